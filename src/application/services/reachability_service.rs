//! Request-side access to the reachability pipeline.

use std::sync::Arc;

use tracing::debug;

use crate::domain::jobs::ReachabilityJob;
use crate::domain::queue::{JobSender, QueueError};
use crate::domain::reachability::Reachability;
use crate::infrastructure::cache::ReachabilityCache;

/// Enqueues probe jobs and answers reachability questions from the cache.
///
/// Neither operation waits on the network.
pub struct ReachabilityService {
    queue: JobSender<ReachabilityJob>,
    cache: Arc<ReachabilityCache>,
}

impl ReachabilityService {
    pub fn new(queue: JobSender<ReachabilityJob>, cache: Arc<ReachabilityCache>) -> Self {
        Self { queue, cache }
    }

    /// Schedules a probe of `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Full`] when the probe queue is at capacity.
    pub fn enqueue_reachability_check(&self, uri: &str) -> Result<(), QueueError> {
        self.queue.try_enqueue(ReachabilityJob::new(uri))?;
        debug!("Queued reachability check for {}", uri);
        Ok(())
    }

    pub fn is_reachable(&self, uri: &str) -> Reachability {
        self.cache.is_reachable(uri)
    }

    pub fn queue(&self) -> &JobSender<ReachabilityJob> {
        &self.queue
    }
}
