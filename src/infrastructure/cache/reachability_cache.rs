//! Shared map of the last known reachability per URI.

use crate::domain::reachability::{Reachability, ReachabilityRecord};
use dashmap::DashMap;

/// Concurrent reachability store.
///
/// Keys are URIs compared as plain strings. Entries are created or replaced
/// by the reachability worker once a probe cycle completes and are never
/// removed. Reads and writes lock only the shard holding the key.
#[derive(Debug, Default)]
pub struct ReachabilityCache {
    records: DashMap<String, ReachabilityRecord>,
}

impl ReachabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the verdict of a completed probe cycle, replacing any previous one.
    pub fn record(&self, record: ReachabilityRecord) {
        self.records.insert(record.uri.clone(), record);
    }

    pub fn get(&self, uri: &str) -> Option<ReachabilityRecord> {
        self.records.get(uri).map(|r| r.value().clone())
    }

    /// Current verdict for `uri`; [`Reachability::Unknown`] when never recorded.
    pub fn is_reachable(&self, uri: &str) -> Reachability {
        Reachability::from(self.records.get(uri).as_deref())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
