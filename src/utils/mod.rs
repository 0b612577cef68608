//! Helpers shared by the application services.
//!
//! - [`url_normalizer`] - Canonical form of target URLs
//! - [`hash`] - Short URL hash derivation

pub mod hash;
pub mod url_normalizer;
