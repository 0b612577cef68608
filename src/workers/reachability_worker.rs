//! Background probing of short URL targets.
//!
//! Each dequeued [`ReachabilityJob`] goes through up to `max_attempts` GET
//! requests spaced by a fixed delay. A `200 OK` on any attempt ends the cycle
//! as reachable; anything else (other statuses, redirects included,
//! connection errors, timeouts) is a failed attempt. The verdict is written to
//! the [`ReachabilityCache`] once, after the cycle resolves, so readers only
//! ever see the previous verdict or the final one.

use std::sync::Arc;
use std::time::Duration;

use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, warn};

use crate::domain::jobs::ReachabilityJob;
use crate::domain::queue::JobReceiver;
use crate::domain::reachability::ReachabilityRecord;
use crate::infrastructure::cache::ReachabilityCache;
use crate::infrastructure::probe::{HttpProbe, ProbeError};

/// Probe attempts per job.
pub const MAX_ATTEMPTS: usize = 3;
/// Pause between two attempts of the same job.
pub const ATTEMPT_DELAY: Duration = Duration::from_secs(1);
/// Connect timeout applied by the HTTP probe.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// The only status accepted as reachable.
pub const SUCCESS_STATUS: u16 = 200;

/// Attempt budget and spacing for one probe cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            delay: ATTEMPT_DELAY,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error("unexpected status {0}")]
    Status(u16),
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Single consumer of the reachability queue.
pub struct ReachabilityWorker {
    probe: Arc<dyn HttpProbe>,
    cache: Arc<ReachabilityCache>,
    policy: RetryPolicy,
}

impl ReachabilityWorker {
    pub fn new(
        probe: Arc<dyn HttpProbe>,
        cache: Arc<ReachabilityCache>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            probe,
            cache,
            policy,
        }
    }

    /// Drains the queue until every producer is gone.
    ///
    /// Probe failures are absorbed per job; the loop never exits because of one.
    pub async fn run(self, mut rx: JobReceiver<ReachabilityJob>) {
        info!("Reachability worker started");
        while let Some(job) = rx.dequeue().await {
            self.process(job).await;
        }
        info!("Reachability worker stopped: queue closed");
    }

    /// Runs one probe cycle and records its verdict.
    pub async fn process(&self, job: ReachabilityJob) -> ReachabilityRecord {
        info!("Checking reachability of {}", job.uri);
        let reachable = self.probe_with_retries(&job.uri).await;

        let record = ReachabilityRecord::new(job.uri, reachable);
        self.cache.record(record.clone());
        record
    }

    async fn probe_with_retries(&self, uri: &str) -> bool {
        let strategy =
            FixedInterval::new(self.policy.delay).take(self.policy.max_attempts.saturating_sub(1));

        let mut attempts = 0;
        let result = Retry::spawn(strategy, || {
            attempts += 1;
            self.attempt(uri, attempts)
        })
        .await;

        match result {
            Ok(()) => {
                info!("{} is reachable (attempt {})", uri, attempts);
                true
            }
            Err(e) => {
                warn!("{} is unreachable after {} attempts: {}", uri, attempts, e);
                false
            }
        }
    }

    async fn attempt(&self, uri: &str, attempt: usize) -> Result<(), AttemptError> {
        debug!(
            "Probing {} (attempt {}/{})",
            uri, attempt, self.policy.max_attempts
        );
        match self.probe.get(uri).await? {
            SUCCESS_STATUS => Ok(()),
            status => {
                debug!("{} answered {}", uri, status);
                Err(AttemptError::Status(status))
            }
        }
    }
}
