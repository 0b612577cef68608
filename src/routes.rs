//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{hash}`      - Short URL redirect (public)
//! - `GET  /{hash}/qr`   - QR image of a short URL (public)
//! - `GET  /health`      - Health check: storage and queues (public)
//! - `/api/*`            - Management API (per-IP rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api`
//!
//! Trailing-slash normalization is applied around the router by
//! [`crate::server::run`].

use crate::api;
use crate::api::handlers::{health_handler, qr_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let api_router = api::routes::api_routes().layer(rate_limit::layer());

    Router::new()
        .route("/health", get(health_handler))
        .route("/{hash}", get(redirect_handler))
        .route("/{hash}/qr", get(qr_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
