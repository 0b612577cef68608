//! SVG QR renderer backed by the `qrcode` crate.

use super::service::{QrRenderer, RenderError};
use qrcode::{QrCode, render::svg};

/// Default minimum width/height of the rendered image in pixels.
pub const DEFAULT_QR_SIZE: u32 = 200;

/// Renders QR codes as standalone SVG documents.
pub struct SvgQrRenderer {
    size: u32,
}

impl SvgQrRenderer {
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl Default for SvgQrRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_QR_SIZE)
    }
}

impl QrRenderer for SvgQrRenderer {
    fn render(&self, url: &str) -> Result<Vec<u8>, RenderError> {
        let code = QrCode::new(url.as_bytes()).map_err(|e| RenderError(e.to_string()))?;
        let image = code
            .render::<svg::Color>()
            .min_dimensions(self.size, self.size)
            .build();
        Ok(image.into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_svg() {
        let renderer = SvgQrRenderer::default();

        let bytes = renderer.render("https://s.example.com/abc123").unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("<svg"));
        assert_eq!(renderer.content_type(), "image/svg+xml");
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = SvgQrRenderer::default();

        let first = renderer.render("https://s.example.com/abc123").unwrap();
        let second = renderer.render("https://s.example.com/abc123").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_render_rejects_oversized_data() {
        let renderer = SvgQrRenderer::default();
        let too_long = format!("https://example.com/{}", "x".repeat(5000));

        assert!(renderer.render(&too_long).is_err());
    }
}
