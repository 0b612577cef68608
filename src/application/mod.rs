//! Application layer services implementing business logic.
//!
//! Services sit between the HTTP handlers and the domain: they validate input,
//! call repositories and offer jobs to the work queues. None of them waits on a
//! background worker.
//!
//! # Available Services
//!
//! - [`services::LinkService`] - Short URL creation and lookup
//! - [`services::RedirectService`] - Reachability gate and rate limit for redirects
//! - [`services::ReachabilityService`] - Probe scheduling and verdict lookup
//! - [`services::QrService`] - QR scheduling and image lookup
//! - [`services::TokenBucketLimiter`] - Per-hash token buckets

pub mod services;
