//! Short URL entity: a hash mapped to a redirect target plus creation options.

use chrono::{DateTime, Utc};

/// HTTP status used for redirects unless stated otherwise.
pub const DEFAULT_REDIRECT_MODE: u16 = 307;

/// Where a short URL points and how the redirect is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub target: String,
    pub mode: u16,
}

impl Redirection {
    pub fn temporary(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: DEFAULT_REDIRECT_MODE,
        }
    }
}

/// Options captured when the short URL was created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortUrlProperties {
    pub ip: Option<String>,
    pub sponsor: Option<String>,
    pub safe: bool,
    /// Whether a QR image was requested for this short URL.
    pub qr: bool,
    /// Redirects allowed per rate-limit window; `0` means unlimited.
    pub limit: u32,
}

/// A shortened URL keyed by its hash.
#[derive(Debug, Clone)]
pub struct ShortUrl {
    pub hash: String,
    pub redirection: Redirection,
    pub created: DateTime<Utc>,
    pub properties: ShortUrlProperties,
}

impl ShortUrl {
    /// Creates a short URL with a temporary redirect, stamped with the current time.
    pub fn new(hash: String, target: String, properties: ShortUrlProperties) -> Self {
        Self {
            hash,
            redirection: Redirection::temporary(target),
            created: Utc::now(),
            properties,
        }
    }

    pub fn target(&self) -> &str {
        &self.redirection.target
    }

    pub fn is_rate_limited(&self) -> bool {
        self.properties.limit > 0
    }
}
