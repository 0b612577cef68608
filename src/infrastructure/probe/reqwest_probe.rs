//! `reqwest`-backed HTTP probe.

use super::service::{HttpProbe, ProbeError};
use async_trait::async_trait;
use reqwest::{Client, redirect};
use std::time::Duration;
use tracing::debug;

/// Probe that performs a plain GET and reports the status code.
///
/// Redirects are not followed, so a `3xx` answer is reported as-is and
/// counts as a failed probe for the reachability worker.
pub struct ReqwestProbe {
    client: Client,
}

impl ReqwestProbe {
    /// Builds a probe whose connections time out after `connect_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(connect_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(redirect::Policy::none())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn get(&self, uri: &str) -> Result<u16, ProbeError> {
        let response = self.client.get(uri).send().await.map_err(|e| ProbeError {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status().as_u16();
        debug!("GET {} -> {}", uri, status);
        Ok(status)
    }
}
