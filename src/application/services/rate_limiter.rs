//! Per-hash redirect rate limiting.

use std::time::Duration;

use dashmap::{DashMap, mapref::entry::Entry};
use serde::Serialize;
use tokio::time::Instant;
use tracing::info;

use crate::domain::rate_limit::TokenBucket;

/// Read-only view of a hash's bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitInfo {
    /// Redirects allowed per window.
    pub limit: u32,
    /// Redirects already served in the current window.
    pub consumed: u32,
}

impl LimitInfo {
    pub fn remaining(&self) -> u32 {
        self.limit - self.consumed
    }
}

/// Token buckets keyed by short URL hash.
///
/// Every operation locks only the shard holding the hash, so test-and-decrement
/// on one hash never contends with redirects of another. Buckets live for the
/// whole process.
pub struct TokenBucketLimiter {
    window: Duration,
    buckets: DashMap<String, TokenBucket>,
}

impl TokenBucketLimiter {
    /// # Panics
    ///
    /// Panics if `window` is zero.
    pub fn new(window: Duration) -> Self {
        assert!(!window.is_zero(), "rate limit window must be non-zero");
        Self {
            window,
            buckets: DashMap::new(),
        }
    }

    /// Creates a full bucket of `limit` tokens for `hash`.
    ///
    /// A `limit` of zero means unlimited and registers nothing. An existing
    /// bucket is kept as is, consumption included.
    ///
    /// Returns `true` if a new bucket was created.
    pub fn register_rate_limit(&self, hash: &str, limit: u32) -> bool {
        if limit == 0 {
            return false;
        }
        match self.buckets.entry(hash.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(TokenBucket::new(limit, self.window, Instant::now()));
                info!("Registered rate limit of {} per {:?} for {}", limit, self.window, hash);
                true
            }
        }
    }

    /// Takes one token for `hash` if any is left.
    ///
    /// Unregistered hashes are always allowed. A denied call consumes nothing.
    pub fn is_redirect_allowed(&self, hash: &str) -> bool {
        match self.buckets.get_mut(hash) {
            Some(mut bucket) => bucket.try_consume(Instant::now()),
            None => true,
        }
    }

    /// Limit and consumption of the current window, `None` when unregistered.
    pub fn get_limit_info(&self, hash: &str) -> Option<LimitInfo> {
        let now = Instant::now();
        self.buckets.get(hash).map(|bucket| LimitInfo {
            limit: bucket.capacity(),
            consumed: bucket.consumed_at(now),
        })
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
