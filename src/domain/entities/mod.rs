//! Core domain entities.
//!
//! - [`ShortUrl`] - A hash mapped to a redirect target
//! - [`Click`] - A followed redirect
//!
//! `NewClick` is the creation-side counterpart of [`Click`]; identifiers and
//! timestamps are assigned by the repository.

pub mod click;
pub mod short_url;

pub use click::{Click, NewClick};
pub use short_url::{DEFAULT_REDIRECT_MODE, Redirection, ShortUrl, ShortUrlProperties};
