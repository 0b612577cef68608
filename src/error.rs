//! Service-level error type and its HTTP representation.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::queue::QueueError;

/// Seconds a client should wait before retrying a temporarily unavailable resource.
pub const RETRY_AFTER_SECONDS: u64 = 10;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced to the controller layer.
///
/// Worker-side failures never reach this type: they end up as cache or log
/// state. The only conditions a caller observes are backpressure at enqueue
/// time and "not found / not yet available" at read time.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// The resource exists but background work has not produced it yet.
    #[error("{message}")]
    NotReady { message: String, details: Value },
    #[error("{message}")]
    Unreachable { message: String, details: Value },
    #[error("{message}")]
    RateLimited { message: String, details: Value },
    /// A bounded work queue rejected the job.
    #[error("{message}")]
    ServiceUnavailable { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn not_ready(message: impl Into<String>, details: Value) -> Self {
        Self::NotReady {
            message: message.into(),
            details,
        }
    }
    pub fn unreachable(message: impl Into<String>, details: Value) -> Self {
        Self::Unreachable {
            message: message.into(),
            details,
        }
    }
    pub fn rate_limited(message: impl Into<String>, details: Value) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
        }
    }
    pub fn service_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Status code, machine-readable code and retry hint for this error.
    fn parts(&self) -> (StatusCode, &'static str, Option<u64>) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error", None),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found", None),
            AppError::NotReady { .. } => (
                StatusCode::BAD_REQUEST,
                "not_ready",
                Some(RETRY_AFTER_SECONDS),
            ),
            AppError::Unreachable { .. } => (StatusCode::BAD_REQUEST, "unreachable", None),
            AppError::RateLimited { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, "rate_limited", None)
            }
            AppError::ServiceUnavailable { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                Some(RETRY_AFTER_SECONDS),
            ),
            AppError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        }
    }

    fn into_message_and_details(self) -> (String, Value) {
        match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::NotReady { message, details }
            | AppError::Unreachable { message, details }
            | AppError::RateLimited { message, details }
            | AppError::ServiceUnavailable { message, details }
            | AppError::Internal { message, details } => (message, details),
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(self) -> ErrorInfo {
        let (_, code, _) = self.parts();
        let (message, details) = self.into_message_and_details();
        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _, retry_after) = self.parts();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(seconds) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!({ "fields": e.to_string() }))
    }
}

impl From<QueueError> for AppError {
    fn from(e: QueueError) -> Self {
        match e {
            QueueError::Full { queue } => AppError::service_unavailable(
                "Service is at capacity, try again later",
                json!({ "queue": queue }),
            ),
            QueueError::Closed { queue } => {
                AppError::internal("Background worker is not running", json!({ "queue": queue }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::bad_request("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
            (AppError::not_ready("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::unreachable("x", json!({})), StatusCode::BAD_REQUEST),
            (
                AppError::rate_limited("x", json!({})),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                AppError::service_unavailable("x", json!({})),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::internal("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_retry_after_header() {
        let response = AppError::service_unavailable("busy", json!({})).into_response();
        assert_eq!(
            response
                .headers()
                .get(header::RETRY_AFTER)
                .unwrap()
                .to_str()
                .unwrap(),
            RETRY_AFTER_SECONDS.to_string()
        );

        let response = AppError::not_found("gone", json!({})).into_response();
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[test]
    fn test_queue_full_maps_to_service_unavailable() {
        let error: AppError = QueueError::Full {
            queue: "reachability",
        }
        .into();
        assert!(matches!(error, AppError::ServiceUnavailable { .. }));
    }

    #[test]
    fn test_to_error_info() {
        let info = AppError::not_found("Short URL not found", json!({ "hash": "abc" }))
            .to_error_info();
        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "Short URL not found");
        assert_eq!(info.details["hash"], "abc");
    }
}
