//! Handler for the metrics snapshot.

use axum::{Json, extract::State};

use crate::api::dto::metrics::{MetricsResponse, QueueStatus};
use crate::domain::queue::JobSender;
use crate::state::AppState;

/// Returns the last published gauges and the fill level of each queue.
///
/// # Endpoint
///
/// `GET /api/metrics`
///
/// Gauges are refreshed by the background aggregators, so values lag by up to
/// one refresh interval.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        gauges: state.gauges.snapshot(),
        queues: vec![
            queue_status(state.reachability_service.queue()),
            queue_status(state.qr_service.queue()),
            queue_status(&state.click_sender),
        ],
    })
}

fn queue_status<T>(queue: &JobSender<T>) -> QueueStatus {
    QueueStatus {
        name: queue.name(),
        capacity: queue.capacity(),
        pending: queue.len(),
        closed: queue.is_closed(),
    }
}
