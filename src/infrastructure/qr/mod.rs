//! QR image rendering.

mod service;
mod svg_renderer;

pub use service::{QrRenderer, RenderError};
pub use svg_renderer::{DEFAULT_QR_SIZE, SvgQrRenderer};

#[cfg(test)]
pub use service::MockQrRenderer;
