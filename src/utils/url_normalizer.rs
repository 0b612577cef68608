//! Canonical form of target URLs.
//!
//! Two inputs that normalize to the same string share a short URL hash, so the
//! rules here decide what counts as "the same link".

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Parses `input` and returns its canonical string.
///
/// - scheme must be `http` or `https`
/// - host is lowercased by the parser, default ports are dropped
/// - fragment is removed; path and query are kept verbatim
///
/// # Errors
///
/// - [`UrlNormalizationError::InvalidFormat`] for unparsable input
/// - [`UrlNormalizationError::UnsupportedProtocol`] for any other scheme
/// - [`UrlNormalizationError::MissingHost`] for URLs without a host
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url = Url::parse(input.trim())
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    // `Url` already strips the scheme's default port and lowercases domains.
    url.set_fragment(None);

    Ok(url.into())
}
