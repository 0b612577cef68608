//! Per-client request rate limiting for the management API.
//!
//! This throttles API callers by IP. Redirect limits per short URL are a
//! separate concern handled by [`crate::application::services::TokenBucketLimiter`].

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Replenished requests per second per client.
pub const PER_SECOND: u64 = 2;
/// Requests a client may burst before being throttled.
pub const BURST_SIZE: u32 = 50;

/// Creates the rate limiter applied to `/api`.
///
/// # Limits
///
/// - **Rate**: [`PER_SECOND`] requests per second
/// - **Burst**: [`BURST_SIZE`] requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Keys are the socket peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("non-zero rate limit settings"),
    );

    GovernorLayer::new(governor_conf)
}
