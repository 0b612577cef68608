//! Request-side access to QR images.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::jobs::QrJob;
use crate::domain::queue::{JobSender, QueueError};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::QrCache;

/// A rendered QR image ready to be served.
#[derive(Debug, Clone)]
pub struct QrImage {
    pub bytes: Arc<[u8]>,
    pub content_type: &'static str,
}

pub struct QrService {
    queue: JobSender<QrJob>,
    cache: Arc<QrCache>,
    short_urls: Arc<dyn ShortUrlRepository>,
    content_type: &'static str,
}

impl QrService {
    pub fn new(
        queue: JobSender<QrJob>,
        cache: Arc<QrCache>,
        short_urls: Arc<dyn ShortUrlRepository>,
        content_type: &'static str,
    ) -> Self {
        Self {
            queue,
            cache,
            short_urls,
            content_type,
        }
    }

    /// Schedules rendering of the QR image encoding `url` for `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Full`] when the QR queue is at capacity.
    pub fn enqueue_qr_job(&self, hash: &str, url: &str) -> Result<(), QueueError> {
        self.queue.try_enqueue(QrJob::new(hash, url))?;
        debug!("Queued QR rendering for {}", hash);
        Ok(())
    }

    /// Returns the cached QR image for `hash`.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the hash is unknown or was created without a QR code
    /// - [`AppError::NotReady`] if the image has not been rendered yet
    pub async fn get_qr(&self, hash: &str) -> Result<QrImage, AppError> {
        let short_url = self.short_urls.find_by_key(hash).await?.ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "hash": hash }))
        })?;

        if !short_url.properties.qr {
            return Err(AppError::not_found(
                "QR code was not requested for this short URL",
                json!({ "hash": hash }),
            ));
        }

        self.cache
            .get(hash)
            .map(|bytes| QrImage {
                bytes,
                content_type: self.content_type,
            })
            .ok_or_else(|| {
                AppError::not_ready("QR code is not ready yet", json!({ "hash": hash }))
            })
    }

    pub fn queue(&self) -> &JobSender<QrJob> {
        &self.queue
    }
}
