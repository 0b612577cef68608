//! DTOs for rate-limit inspection.

use serde::Serialize;

/// Current window of a rate-limited short URL.
#[derive(Debug, Serialize)]
pub struct LimitResponse {
    pub hash: String,
    pub limit: u32,
    pub consumed: u32,
    pub remaining: u32,
    pub window_seconds: u64,
}
