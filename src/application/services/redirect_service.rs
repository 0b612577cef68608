//! Redirect admission: reachability gate and rate limit.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::application::services::{ReachabilityService, TokenBucketLimiter};
use crate::domain::entities::Redirection;
use crate::domain::reachability::Reachability;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// Decides whether a short URL may be followed right now.
///
/// All checks read shared state only; nothing here waits on a worker.
pub struct RedirectService {
    short_urls: Arc<dyn ShortUrlRepository>,
    reachability: Arc<ReachabilityService>,
    limiter: Arc<TokenBucketLimiter>,
}

impl RedirectService {
    pub fn new(
        short_urls: Arc<dyn ShortUrlRepository>,
        reachability: Arc<ReachabilityService>,
        limiter: Arc<TokenBucketLimiter>,
    ) -> Self {
        Self {
            short_urls,
            reachability,
            limiter,
        }
    }

    /// Resolves `hash` to its redirection, consuming a rate-limit token.
    ///
    /// The rate limit is only checked once the target is known to be
    /// reachable, so refused attempts never use up tokens.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for an unknown hash
    /// - [`AppError::NotReady`] while the target has not been probed yet
    /// - [`AppError::Unreachable`] when the last probe failed
    /// - [`AppError::RateLimited`] when the current window is used up
    pub async fn redirect(&self, hash: &str) -> Result<Redirection, AppError> {
        let short_url = self.short_urls.find_by_key(hash).await?.ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "hash": hash }))
        })?;

        match self.reachability.is_reachable(short_url.target()) {
            Reachability::Reachable => {}
            Reachability::Unknown => {
                return Err(AppError::not_ready(
                    "Target URL has not been verified yet",
                    json!({ "hash": hash }),
                ));
            }
            Reachability::Unreachable => {
                return Err(AppError::unreachable(
                    "Target URL is not reachable",
                    json!({ "hash": hash, "target": short_url.target() }),
                ));
            }
        }

        // Buckets are process-local; records loaded from storage get theirs on first use.
        self.limiter
            .register_rate_limit(&short_url.hash, short_url.properties.limit);
        if !self.limiter.is_redirect_allowed(&short_url.hash) {
            return Err(AppError::rate_limited(
                "Redirect limit exceeded for this short URL",
                json!({ "hash": hash, "limit": short_url.properties.limit }),
            ));
        }

        debug!("Redirecting {} -> {}", hash, short_url.target());
        Ok(short_url.redirection)
    }
}
