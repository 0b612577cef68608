//! Gauge refresh pipeline.
//!
//! A [`MetricsScheduler`] ticks on a fixed interval and drops one
//! [`MetricSignal`] into each aggregator's queue. Each [`MetricsAggregator`]
//! owns one gauge: on a matching signal it asks its [`CounterSource`] for the
//! current count and republishes it. Ticks that find a queue full are skipped,
//! since the refresh already pending will read the latest count anyway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::domain::jobs::MetricSignal;
use crate::domain::queue::{JobReceiver, JobSender, QueueError};
use crate::domain::repositories::{ClickRepository, ShortUrlRepository};
use crate::error::AppError;
use crate::infrastructure::metrics::GaugePublisher;

/// Gauge fed by the click repository.
pub const REDIRECT_COUNTER: &str = "app.metric.redirect_counter";
/// Gauge fed by the short URL repository.
pub const URI_COUNTER: &str = "app.metric.uri_counter";

/// Default pause between two scheduler ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Something that can be counted for a gauge.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterSource: Send + Sync {
    async fn counter(&self) -> Result<i64, AppError>;
}

#[async_trait]
impl CounterSource for Arc<dyn ShortUrlRepository> {
    async fn counter(&self) -> Result<i64, AppError> {
        ShortUrlRepository::counter(self.as_ref()).await
    }
}

#[async_trait]
impl CounterSource for Arc<dyn ClickRepository> {
    async fn counter(&self) -> Result<i64, AppError> {
        ClickRepository::counter(self.as_ref()).await
    }
}

/// Consumer of one metrics queue, owning one gauge.
pub struct MetricsAggregator<C> {
    metric: &'static str,
    source: C,
    publisher: Arc<dyn GaugePublisher>,
}

impl<C: CounterSource> MetricsAggregator<C> {
    pub fn new(metric: &'static str, source: C, publisher: Arc<dyn GaugePublisher>) -> Self {
        Self {
            metric,
            source,
            publisher,
        }
    }

    pub fn metric(&self) -> &'static str {
        self.metric
    }

    pub async fn run(self, mut rx: JobReceiver<MetricSignal>) {
        info!("Metrics aggregator for {} started", self.metric);
        while let Some(signal) = rx.dequeue().await {
            self.handle(signal).await;
        }
        info!("Metrics aggregator for {} stopped: queue closed", self.metric);
    }

    /// Refreshes the gauge when `signal` names it.
    ///
    /// Returns the published value, or `None` when the signal was discarded or
    /// the count could not be read.
    pub async fn handle(&self, signal: MetricSignal) -> Option<f64> {
        if signal.name != self.metric {
            debug!(
                "Aggregator for {} discarding signal {}",
                self.metric, signal.name
            );
            return None;
        }

        match self.source.counter().await {
            Ok(count) => {
                let value = count as f64;
                self.publisher.publish(self.metric, value);
                debug!("Published {} = {}", self.metric, value);
                Some(value)
            }
            Err(e) => {
                warn!("Failed to refresh {}: {}", self.metric, e);
                None
            }
        }
    }
}

/// Periodic producer of refresh signals.
pub struct MetricsScheduler {
    interval: Duration,
    targets: Vec<(&'static str, JobSender<MetricSignal>)>,
}

impl MetricsScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            targets: Vec::new(),
        }
    }

    /// Routes signals for `metric` into `tx`.
    pub fn target(mut self, metric: &'static str, tx: JobSender<MetricSignal>) -> Self {
        self.targets.push((metric, tx));
        self
    }

    /// Ticks until every target queue is closed.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Metrics scheduler started ({} gauges every {:?})",
            self.targets.len(),
            self.interval
        );
        loop {
            ticker.tick().await;
            if !self.tick() {
                break;
            }
        }
        info!("Metrics scheduler stopped: all queues closed");
    }

    /// Enqueues one signal per target. Returns `false` once no target is open.
    pub fn tick(&self) -> bool {
        let mut open = false;
        for (metric, tx) in &self.targets {
            match tx.try_enqueue(MetricSignal::new(*metric)) {
                Ok(()) => open = true,
                Err(QueueError::Full { .. }) => {
                    open = true;
                    debug!("Refresh of {} already pending, skipping tick", metric);
                }
                Err(QueueError::Closed { .. }) => {
                    debug!("Queue for {} closed", metric);
                }
            }
        }
        open
    }
}
