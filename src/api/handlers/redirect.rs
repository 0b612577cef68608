//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short URL hash to its target.
///
/// # Endpoint
///
/// `GET /{hash}`
///
/// # Request Flow
///
/// 1. Look up the short URL
/// 2. Check the cached reachability verdict of the target
/// 3. Take a rate-limit token
/// 4. Send a click event to the background worker
/// 5. Return the redirect (307 unless stored otherwise)
///
/// # Click Tracking
///
/// Click events are offered to a bounded queue. If the queue is full the
/// click is dropped; the redirect is never delayed.
///
/// # Errors
///
/// - 404 Not Found if the hash doesn't exist
/// - 400 Bad Request (with `Retry-After`) while the target is not verified yet
/// - 400 Bad Request if the target is unreachable
/// - 429 Too Many Requests when the redirect limit is used up
pub async fn redirect_handler(
    Path(hash): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let redirection = state.redirect_service.redirect(&hash).await?;

    let click_event = ClickEvent::new(
        hash,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );
    if let Err(e) = state.click_sender.try_enqueue(click_event) {
        warn!("Dropping click event: {}", e);
    }

    let status = StatusCode::from_u16(redirection.mode)
        .ok()
        .filter(StatusCode::is_redirection)
        .unwrap_or(StatusCode::TEMPORARY_REDIRECT);

    Ok((status, [(header::LOCATION, redirection.target)]))
}
