//! In-process caches filled by the background workers.
//!
//! - [`ReachabilityCache`] - Last probe verdict per target URI
//! - [`QrCache`] - Rendered QR images per short URL hash

mod qr_cache;
mod reachability_cache;

pub use qr_cache::QrCache;
pub use reachability_cache::ReachabilityCache;
