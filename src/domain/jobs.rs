//! Work items placed on the background queues.
//!
//! All jobs are plain values; ownership moves from the producer to the single
//! worker that dequeues them.

/// Request to probe a target URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityJob {
    pub uri: String,
}

impl ReachabilityJob {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Request to render the QR image of a short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrJob {
    pub hash: String,
    /// Text encoded in the image, normally the public short URL.
    pub renderable_url: String,
}

impl QrJob {
    pub fn new(hash: impl Into<String>, renderable_url: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            renderable_url: renderable_url.into(),
        }
    }
}

/// Tick telling a metrics aggregator to refresh the named gauge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSignal {
    pub name: String,
}

impl MetricSignal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
