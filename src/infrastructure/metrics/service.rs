//! Gauge publication trait.

/// Sink for recomputed gauge values.
///
/// # Implementations
///
/// - [`crate::infrastructure::metrics::GaugeRegistry`] - `metrics` facade plus an in-process snapshot
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait GaugePublisher: Send + Sync {
    /// Replaces the current value of the gauge `name`.
    fn publish(&self, name: &str, value: f64);
}
