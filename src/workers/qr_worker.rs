//! Background QR image rendering.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::jobs::QrJob;
use crate::domain::queue::JobReceiver;
use crate::infrastructure::cache::QrCache;
use crate::infrastructure::qr::QrRenderer;

/// What happened to a single QR job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrOutcome {
    /// An image was rendered and stored.
    Rendered,
    /// An image already existed for the hash; nothing was rendered.
    AlreadyCached,
    /// Rendering failed; the job was dropped.
    Failed,
}

/// Single consumer of the QR queue.
///
/// Renders on the blocking pool and stores the result in [`QrCache`]. Each hash
/// is rendered at most once per cache lifetime.
pub struct QrWorker {
    renderer: Arc<dyn QrRenderer>,
    cache: Arc<QrCache>,
}

impl QrWorker {
    pub fn new(renderer: Arc<dyn QrRenderer>, cache: Arc<QrCache>) -> Self {
        Self { renderer, cache }
    }

    pub async fn run(self, mut rx: JobReceiver<QrJob>) {
        info!("QR worker started");
        while let Some(job) = rx.dequeue().await {
            self.process(job).await;
        }
        info!("QR worker stopped: queue closed");
    }

    pub async fn process(&self, job: QrJob) -> QrOutcome {
        if self.cache.contains(&job.hash) {
            debug!("QR image for {} already cached", job.hash);
            return QrOutcome::AlreadyCached;
        }

        let renderer = Arc::clone(&self.renderer);
        let url = job.renderable_url.clone();
        match tokio::task::spawn_blocking(move || renderer.render(&url)).await {
            Ok(Ok(image)) => {
                let size = image.len();
                if self.cache.insert_if_absent(&job.hash, image) {
                    info!("Rendered QR image for {} ({} bytes)", job.hash, size);
                }
                QrOutcome::Rendered
            }
            Ok(Err(e)) => {
                warn!("Dropping QR job for {}: {}", job.hash, e);
                QrOutcome::Failed
            }
            Err(e) => {
                error!("QR render task for {} failed: {}", job.hash, e);
                QrOutcome::Failed
            }
        }
    }
}
