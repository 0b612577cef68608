//! DTOs for short URL creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The target URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional sponsor tag stored with the short URL.
    #[validate(length(max = 255))]
    pub sponsor: Option<String>,

    /// When true, a QR image of the short URL is rendered in the background.
    #[serde(default)]
    pub qr: bool,

    /// Redirects allowed per window; absent, zero or negative means unlimited.
    #[validate(range(max = 1_000_000))]
    pub limit: Option<i64>,
}

impl ShortenRequest {
    /// Redirect limit with `0` standing for unlimited.
    pub fn redirect_limit(&self) -> u32 {
        self.limit
            .filter(|limit| *limit > 0)
            .map_or(0, |limit| u32::try_from(limit).unwrap_or(u32::MAX))
    }
}

/// Options echoed back on creation.
#[derive(Debug, Serialize)]
pub struct LinkProperties {
    pub safe: bool,
}

/// A created short URL.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub hash: String,
    /// Public short URL.
    pub url: String,
    pub target: String,
    pub created: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,

    /// Where the QR image will be served, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    pub properties: LinkProperties,
}
