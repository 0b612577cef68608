//! API route configuration.

use crate::api::handlers::{limit_handler, metrics_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Management API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /link`               - Create a short URL
/// - `GET  /link/{hash}/limit`  - Rate-limit window of a short URL
/// - `GET  /metrics`            - Gauge and queue snapshot
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(shorten_handler))
        .route("/link/{hash}/limit", get(limit_handler))
        .route("/metrics", get(metrics_handler))
}
