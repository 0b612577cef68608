//! Bounded FIFO work queues shared by request handlers and background workers.
//!
//! Every producer/consumer pair in the service goes through this module. The
//! producer side never blocks: [`JobSender::try_enqueue`] answers immediately
//! and a full queue is reported as [`QueueError::Full`], which the request path
//! turns into a `503 Service Unavailable`. The consumer side suspends in
//! [`JobReceiver::dequeue`] until an item arrives, without polling.

use tokio::sync::mpsc::{self, Permit, error::TrySendError};

/// Producer-side queue failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The queue holds `capacity` unconsumed items.
    #[error("queue '{queue}' is full")]
    Full { queue: &'static str },
    /// The consumer has gone away.
    #[error("queue '{queue}' is closed")]
    Closed { queue: &'static str },
}

/// Creates a named FIFO queue holding at most `capacity` unconsumed items.
///
/// # Panics
///
/// Panics if `capacity` is zero. Capacities come from validated
/// [`crate::config::Config`] values.
pub fn bounded<T>(name: &'static str, capacity: usize) -> (JobSender<T>, JobReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity);
    (JobSender { name, tx }, JobReceiver { name, rx })
}

/// Cloneable producer handle.
#[derive(Debug)]
pub struct JobSender<T> {
    name: &'static str,
    tx: mpsc::Sender<T>,
}

impl<T> Clone for JobSender<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            tx: self.tx.clone(),
        }
    }
}

impl<T> JobSender<T> {
    /// Offers an item without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Full`] when no slot is free and
    /// [`QueueError::Closed`] when the consumer has stopped. The item is
    /// dropped in both cases.
    pub fn try_enqueue(&self, item: T) -> Result<(), QueueError> {
        match self.tx.try_send(item) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(QueueError::Full { queue: self.name }),
            Err(TrySendError::Closed(_)) => Err(QueueError::Closed { queue: self.name }),
        }
    }

    /// Claims a slot without sending anything yet.
    ///
    /// The slot is held until the returned [`JobPermit`] is used or dropped,
    /// so several queues can be reserved before any of them receives an item.
    ///
    /// # Errors
    ///
    /// Same as [`JobSender::try_enqueue`].
    pub fn try_reserve(&self) -> Result<JobPermit<'_, T>, QueueError> {
        match self.tx.try_reserve() {
            Ok(permit) => Ok(JobPermit { permit }),
            Err(TrySendError::Full(())) => Err(QueueError::Full { queue: self.name }),
            Err(TrySendError::Closed(())) => Err(QueueError::Closed { queue: self.name }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Maximum number of unconsumed items.
    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    /// Slots currently available to producers.
    pub fn free_slots(&self) -> usize {
        self.tx.capacity()
    }

    /// Number of items waiting for the consumer.
    pub fn len(&self) -> usize {
        self.capacity() - self.free_slots()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A reserved queue slot. Dropping it releases the slot.
#[derive(Debug)]
pub struct JobPermit<'a, T> {
    permit: Permit<'a, T>,
}

impl<T> JobPermit<'_, T> {
    /// Sends `item` into the reserved slot. Cannot fail.
    pub fn send(self, item: T) {
        self.permit.send(item);
    }
}

/// Single-consumer handle owned by a worker task.
#[derive(Debug)]
pub struct JobReceiver<T> {
    name: &'static str,
    rx: mpsc::Receiver<T>,
}

impl<T> JobReceiver<T> {
    /// Waits for the next item in FIFO order.
    ///
    /// Returns `None` once every [`JobSender`] has been dropped and the queue
    /// is drained.
    pub async fn dequeue(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_try_enqueue_rejects_when_full() {
        let (tx, _rx) = bounded::<u32>("test", 2);

        assert!(tx.try_enqueue(1).is_ok());
        assert!(tx.try_enqueue(2).is_ok());
        assert_eq!(
            tx.try_enqueue(3),
            Err(QueueError::Full { queue: "test" })
        );
        assert_eq!(tx.len(), 2);
        assert_eq!(tx.free_slots(), 0);
    }

    #[tokio::test]
    async fn test_slot_freed_after_dequeue() {
        let (tx, mut rx) = bounded::<u32>("test", 1);

        tx.try_enqueue(1).unwrap();
        assert!(tx.try_enqueue(2).is_err());

        assert_eq!(rx.dequeue().await, Some(1));
        assert!(tx.try_enqueue(2).is_ok());
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let (tx, mut rx) = bounded::<&str>("test", 10);

        for item in ["a", "b", "c"] {
            tx.try_enqueue(item).unwrap();
        }

        assert_eq!(rx.dequeue().await, Some("a"));
        assert_eq!(rx.dequeue().await, Some("b"));
        assert_eq!(rx.dequeue().await, Some("c"));
    }

    #[tokio::test]
    async fn test_closed_when_consumer_dropped() {
        let (tx, rx) = bounded::<u32>("test", 4);
        drop(rx);

        assert!(tx.is_closed());
        assert_eq!(
            tx.try_enqueue(1),
            Err(QueueError::Closed { queue: "test" })
        );
    }

    #[tokio::test]
    async fn test_dequeue_returns_none_after_producers_drop() {
        let (tx, mut rx) = bounded::<u32>("test", 4);
        tx.try_enqueue(7).unwrap();
        drop(tx);

        assert_eq!(rx.dequeue().await, Some(7));
        assert_eq!(rx.dequeue().await, None);
    }

    #[tokio::test]
    async fn test_reserved_slot_counts_against_capacity() {
        let (tx, mut rx) = bounded::<u32>("test", 2);

        let permit = tx.try_reserve().unwrap();
        tx.try_enqueue(1).unwrap();
        assert_eq!(tx.try_enqueue(2), Err(QueueError::Full { queue: "test" }));
        assert!(tx.try_reserve().is_err());

        permit.send(9);
        assert_eq!(rx.dequeue().await, Some(1));
        assert_eq!(rx.dequeue().await, Some(9));
    }

    #[tokio::test]
    async fn test_dropped_permit_frees_slot() {
        let (tx, _rx) = bounded::<u32>("test", 1);

        let permit = tx.try_reserve().unwrap();
        assert!(tx.try_enqueue(1).is_err());
        drop(permit);

        assert!(tx.is_empty());
        assert!(tx.try_enqueue(1).is_ok());
    }

    #[tokio::test]
    async fn test_dequeue_waits_for_producer() {
        let (tx, mut rx) = bounded::<u32>("test", 4);

        let consumer = tokio::spawn(async move { rx.dequeue().await });
        tokio::task::yield_now().await;
        tx.try_enqueue(42).unwrap();

        assert_eq!(consumer.await.unwrap(), Some(42));
    }
}
