//! Gauge publication for the metrics aggregators.

mod gauge_registry;
mod service;

pub use gauge_registry::GaugeRegistry;
pub use service::GaugePublisher;

#[cfg(test)]
pub use service::MockGaugePublisher;
