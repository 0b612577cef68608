//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::queue::JobSender;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Storage**: Counts short URLs
/// 2. **Queues**: Reachability, QR and click queues are open; reports free slots
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "12 short URLs" },
///     "reachability_queue": { "status": "ok", "message": "100/100 slots free" },
///     "qr_queue": { "status": "ok", "message": "100/100 slots free" },
///     "click_queue": { "status": "ok", "message": "10000/10000 slots free" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = check_storage(&state).await;
    let checks = HealthChecks {
        storage,
        reachability_queue: check_queue(state.reachability_service.queue()),
        qr_queue: check_queue(state.qr_service.queue()),
        click_queue: check_queue(&state.click_sender),
    };

    let all_healthy = checks.storage.is_ok()
        && checks.reachability_queue.is_ok()
        && checks.qr_queue.is_ok()
        && checks.click_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    match state.short_urls.counter().await {
        Ok(count) => CheckStatus::ok(format!("{} short URLs", count)),
        Err(e) => CheckStatus::error(format!("Storage error: {}", e)),
    }
}

/// A closed queue means its worker is gone.
fn check_queue<T>(queue: &JobSender<T>) -> CheckStatus {
    if queue.is_closed() {
        CheckStatus::error(format!("{} queue is closed", queue.name()))
    } else {
        CheckStatus::ok(format!(
            "{}/{} slots free",
            queue.free_slots(),
            queue.capacity()
        ))
    }
}
