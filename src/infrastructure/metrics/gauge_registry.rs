//! Gauge registry forwarding to the `metrics` facade.

use super::service::GaugePublisher;
use dashmap::DashMap;
use std::collections::BTreeMap;

/// Publishes gauges through the globally installed `metrics` recorder and
/// keeps the last value of each gauge for the `/api/metrics` endpoint.
///
/// Without an installed recorder the facade calls are no-ops and only the
/// local snapshot is updated.
#[derive(Debug, Default)]
pub struct GaugeRegistry {
    values: DashMap<String, f64>,
}

impl GaugeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last published value of `name`, if any.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).map(|v| *v)
    }

    /// All gauges sorted by name.
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.values
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

impl GaugePublisher for GaugeRegistry {
    fn publish(&self, name: &str, value: f64) {
        metrics::gauge!(name.to_string()).set(value);
        self.values.insert(name.to_string(), value);
    }
}
