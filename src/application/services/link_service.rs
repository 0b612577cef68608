//! Short URL creation and lookup.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::application::services::{QrService, ReachabilityService, TokenBucketLimiter};
use crate::domain::entities::{ShortUrl, ShortUrlProperties};
use crate::domain::jobs::{QrJob, ReachabilityJob};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::hash::short_hash;
use crate::utils::url_normalizer::normalize_url;

/// Input of [`LinkService::create_short_url`].
#[derive(Debug, Clone, Default)]
pub struct CreateShortUrl {
    pub url: String,
    pub sponsor: Option<String>,
    pub qr: bool,
    /// Redirects allowed per window; `0` means unlimited.
    pub limit: u32,
    /// Address of the client creating the short URL.
    pub ip: Option<String>,
}

/// Creates short URLs and hands the slow work to the background queues.
///
/// Creation never waits on a probe or a render: it only offers jobs to the
/// bounded queues and fails fast when one of them is full.
pub struct LinkService {
    short_urls: Arc<dyn ShortUrlRepository>,
    reachability: Arc<ReachabilityService>,
    qr: Arc<QrService>,
    limiter: Arc<TokenBucketLimiter>,
    base_url: String,
}

impl LinkService {
    pub fn new(
        short_urls: Arc<dyn ShortUrlRepository>,
        reachability: Arc<ReachabilityService>,
        qr: Arc<QrService>,
        limiter: Arc<TokenBucketLimiter>,
        base_url: String,
    ) -> Self {
        Self {
            short_urls,
            reachability,
            qr,
            limiter,
            base_url,
        }
    }

    /// Creates (or re-creates) the short URL for `request.url`.
    ///
    /// # Steps
    ///
    /// 1. Normalize the URL and derive its hash
    /// 2. Reserve a reachability slot, and a QR slot when `qr` is set
    /// 3. Store the record
    /// 4. Queue the reachability check of the normalized URL and the QR
    ///    rendering of the public short URL, then register the rate limit
    ///
    /// A creation that fails at any step leaves no job queued. The same URL
    /// always yields the same hash; creating it again keeps the original
    /// creation time and rate limit.
    ///
    /// No safe-browsing check is performed: every record is stored as safe.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is invalid or not HTTP(S)
    /// - [`AppError::ServiceUnavailable`] if a work queue is full
    /// - [`AppError::Internal`] on storage errors
    pub async fn create_short_url(&self, request: CreateShortUrl) -> Result<ShortUrl, AppError> {
        let normalized = normalize_url(&request.url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;
        let hash = short_hash(&normalized);

        let reachability_slot = self.reachability.queue().try_reserve()?;
        let qr_slot = if request.qr {
            Some(self.qr.queue().try_reserve()?)
        } else {
            None
        };

        let properties = ShortUrlProperties {
            ip: request.ip,
            sponsor: request.sponsor,
            safe: true,
            qr: request.qr,
            limit: request.limit,
        };
        let saved = self
            .short_urls
            .save(ShortUrl::new(hash, normalized, properties))
            .await?;

        reachability_slot.send(ReachabilityJob::new(saved.target()));
        if let Some(slot) = qr_slot {
            slot.send(QrJob::new(saved.hash.clone(), self.short_url(&saved.hash)));
        }
        self.limiter
            .register_rate_limit(&saved.hash, saved.properties.limit);

        info!("Created short URL {} -> {}", saved.hash, saved.target());
        Ok(saved)
    }

    /// Looks up a short URL by hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no short URL has this hash.
    pub async fn get_by_hash(&self, hash: &str) -> Result<ShortUrl, AppError> {
        self.short_urls
            .find_by_key(hash)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "hash": hash })))
    }

    /// Public URL of the short URL `hash`.
    pub fn short_url(&self, hash: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), hash)
    }
}
