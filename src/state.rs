//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    LinkService, QrService, ReachabilityService, RedirectService, TokenBucketLimiter,
};
use crate::domain::click_event::ClickEvent;
use crate::domain::queue::JobSender;
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::metrics::GaugeRegistry;

/// Handles to services, queues and caches.
///
/// Cloned per request; every field is a cheap reference-counted handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub reachability_service: Arc<ReachabilityService>,
    pub qr_service: Arc<QrService>,
    pub limiter: Arc<TokenBucketLimiter>,
    pub gauges: Arc<GaugeRegistry>,
    pub short_urls: Arc<dyn ShortUrlRepository>,
    pub click_sender: JobSender<ClickEvent>,
}
