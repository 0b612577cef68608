//! Fixed-window token bucket.
//!
//! A bucket starts full with `capacity` tokens. Every allowed action consumes
//! one token; when a window elapses the bucket is topped up to `capacity` in a
//! single lump. Windows are anchored at the bucket's creation instant, so a
//! bucket idle for several windows refills once and keeps its original grid.

use std::time::Duration;
use tokio::time::Instant;

/// Default refill window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct TokenBucket {
    capacity: u32,
    available: u32,
    window: Duration,
    window_start: Instant,
}

impl TokenBucket {
    /// Creates a full bucket whose first window starts at `now`.
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero.
    pub fn new(capacity: u32, window: Duration, now: Instant) -> Self {
        assert!(!window.is_zero(), "token bucket window must be non-zero");
        Self {
            capacity,
            available: capacity,
            window,
            window_start: now,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Atomically (under the caller's exclusive borrow) takes one token.
    ///
    /// Returns `false` without changing state when the bucket is empty.
    pub fn try_consume(&mut self, now: Instant) -> bool {
        self.refill(now);
        if self.available == 0 {
            return false;
        }
        self.available -= 1;
        true
    }

    /// Tokens available at `now`, accounting for a pending refill.
    pub fn available_at(&self, now: Instant) -> u32 {
        if self.window_elapsed(now) {
            self.capacity
        } else {
            self.available
        }
    }

    /// Tokens consumed in the window containing `now`.
    pub fn consumed_at(&self, now: Instant) -> u32 {
        self.capacity - self.available_at(now)
    }

    fn window_elapsed(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.window_start) >= self.window
    }

    fn refill(&mut self, now: Instant) {
        if !self.window_elapsed(now) {
            return;
        }
        let elapsed = now.saturating_duration_since(self.window_start);
        let into_window = elapsed.as_nanos() % self.window.as_nanos();
        self.window_start = now - Duration::from_nanos(into_window as u64);
        self.available = self.capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(3600);

    #[test]
    fn test_consumes_exactly_capacity_tokens() {
        let start = Instant::now();
        let mut bucket = TokenBucket::new(3, WINDOW, start);

        assert!(bucket.try_consume(start));
        assert!(bucket.try_consume(start));
        assert!(bucket.try_consume(start));
        assert!(!bucket.try_consume(start));
        assert_eq!(bucket.available_at(start), 0);
    }

    #[test]
    fn test_denied_attempt_consumes_nothing() {
        let start = Instant::now();
        let mut bucket = TokenBucket::new(1, WINDOW, start);

        assert!(bucket.try_consume(start));
        for _ in 0..5 {
            assert!(!bucket.try_consume(start));
        }
        assert_eq!(bucket.consumed_at(start), 1);
    }

    #[test]
    fn test_refills_at_window_boundary() {
        let start = Instant::now();
        let mut bucket = TokenBucket::new(2, WINDOW, start);

        assert!(bucket.try_consume(start));
        assert!(bucket.try_consume(start));

        let almost = start + WINDOW - Duration::from_secs(1);
        assert!(!bucket.try_consume(almost));

        let next_window = start + WINDOW;
        assert!(bucket.try_consume(next_window));
        assert!(bucket.try_consume(next_window));
        assert!(!bucket.try_consume(next_window));
    }

    #[test]
    fn test_refill_keeps_window_grid() {
        let start = Instant::now();
        let mut bucket = TokenBucket::new(1, WINDOW, start);
        assert!(bucket.try_consume(start));

        // Idle for two and a half windows: one lump refill, window anchored at 2h.
        let later = start + WINDOW * 2 + WINDOW / 2;
        assert!(bucket.try_consume(later));
        assert!(!bucket.try_consume(start + WINDOW * 3 - Duration::from_secs(1)));
        assert!(bucket.try_consume(start + WINDOW * 3));
    }

    #[test]
    fn test_consumed_view_does_not_mutate() {
        let start = Instant::now();
        let mut bucket = TokenBucket::new(4, WINDOW, start);
        bucket.try_consume(start);
        bucket.try_consume(start);

        assert_eq!(bucket.consumed_at(start), 2);
        assert_eq!(bucket.consumed_at(start + WINDOW), 0);
        // The pending refill is only applied by a consuming call.
        assert_eq!(bucket.consumed_at(start), 2);
    }
}
