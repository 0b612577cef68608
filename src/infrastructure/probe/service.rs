//! HTTP probe trait and error type.

use async_trait::async_trait;

/// A probe attempt that produced no HTTP status.
#[derive(Debug, Clone, thiserror::Error)]
#[error("request to {uri} failed: {reason}")]
pub struct ProbeError {
    pub uri: String,
    pub reason: String,
}

/// Issues a single GET request against a target URI.
///
/// Implementations must not retry internally; the reachability worker owns
/// the attempt budget and the inter-attempt delay.
///
/// # Implementations
///
/// - [`crate::infrastructure::probe::ReqwestProbe`] - `reqwest` client with a connect timeout
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Returns the response status code.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on connection failure, timeout or an invalid URI.
    async fn get(&self, uri: &str) -> Result<u16, ProbeError>;
}
