//! QR renderer trait and error type.

/// Rendering failed for the given input.
///
/// Rendering is deterministic, so callers drop the job instead of retrying.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to render QR code: {0}")]
pub struct RenderError(pub String);

/// Turns a URL into an encoded QR image.
///
/// Rendering is CPU-bound; async callers run it on the blocking pool.
#[cfg_attr(test, mockall::automock)]
pub trait QrRenderer: Send + Sync {
    /// Encodes `url` and returns the image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the data cannot be encoded (e.g. too long).
    fn render(&self, url: &str) -> Result<Vec<u8>, RenderError>;

    /// MIME type of the bytes produced by [`QrRenderer::render`].
    fn content_type(&self) -> &'static str;
}
