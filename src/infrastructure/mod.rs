//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces consumed by the domain workers and the
//! application services.
//!
//! # Modules
//!
//! - [`cache`] - Reachability and QR caches
//! - [`metrics`] - Gauge publication
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`probe`] - Outbound HTTP probing
//! - [`qr`] - QR image rendering

pub mod cache;
pub mod metrics;
pub mod persistence;
pub mod probe;
pub mod qr;
