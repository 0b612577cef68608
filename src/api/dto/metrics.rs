//! DTOs for the metrics snapshot endpoint.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    /// Last published value of every gauge, sorted by name.
    pub gauges: BTreeMap<String, f64>,
    pub queues: Vec<QueueStatus>,
}

/// Fill level of one work queue.
#[derive(Debug, Serialize)]
pub struct QueueStatus {
    pub name: &'static str,
    pub capacity: usize,
    pub pending: usize,
    pub closed: bool,
}
