//! HTTP middleware for request processing and protection.
//!
//! - [`rate_limit`] - Per-IP throttling of the management API
//! - [`tracing`] - Request spans and response logging

pub mod rate_limit;
pub mod tracing;
