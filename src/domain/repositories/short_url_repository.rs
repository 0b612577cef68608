//! Repository trait for short URL records.

use crate::domain::entities::ShortUrl;
use crate::error::AppError;
use async_trait::async_trait;

/// Key-value store of short URLs keyed by hash.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Inserts the record stored under `short_url.hash`, or updates it.
    ///
    /// An update keeps the stored creation time and rate limit; the returned
    /// record reflects what is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, short_url: ShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a short URL by its hash.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortUrl))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_key(&self, hash: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Counts stored short URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn counter(&self) -> Result<i64, AppError>;
}
