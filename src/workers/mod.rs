//! Background consumers of the work queues.
//!
//! Each worker owns the receiving half of one [`crate::domain::queue`] queue and
//! runs as its own task until every producer is dropped:
//!
//! - [`ReachabilityWorker`] - Probes targets with bounded retries
//! - [`QrWorker`] - Renders QR images on the blocking pool
//! - [`MetricsAggregator`] / [`MetricsScheduler`] - Periodic gauge refresh
//! - [`run_click_worker`] - Persists redirect clicks
//!
//! Workers never propagate job failures: an error is logged and the loop moves
//! on to the next job.

mod click_worker;
mod metrics_worker;
mod qr_worker;
mod reachability_worker;

pub use click_worker::run_click_worker;
pub use metrics_worker::{
    CounterSource, DEFAULT_INTERVAL, MetricsAggregator, MetricsScheduler, REDIRECT_COUNTER,
    URI_COUNTER,
};
pub use qr_worker::{QrOutcome, QrWorker};
pub use reachability_worker::{
    ATTEMPT_DELAY, CONNECT_TIMEOUT, MAX_ATTEMPTS, ReachabilityWorker, RetryPolicy, SUCCESS_STATUS,
};
