//! Handler for rate-limit inspection.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::limit::LimitResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the limit and consumption of the current window.
///
/// # Endpoint
///
/// `GET /api/link/{hash}/limit`
///
/// Reading the limit never consumes a token.
///
/// # Errors
///
/// - 404 Not Found if the hash is unknown or the short URL is unlimited
pub async fn limit_handler(
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LimitResponse>, AppError> {
    let short_url = state.link_service.get_by_hash(&hash).await?;

    state
        .limiter
        .register_rate_limit(&short_url.hash, short_url.properties.limit);
    let info = state.limiter.get_limit_info(&short_url.hash).ok_or_else(|| {
        AppError::not_found("Short URL is not rate limited", json!({ "hash": hash }))
    })?;

    Ok(Json(LimitResponse {
        hash: short_url.hash,
        limit: info.limit,
        consumed: info.consumed,
        remaining: info.remaining(),
        window_seconds: state.limiter.window().as_secs(),
    }))
}
