//! Handler for QR image retrieval.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Serves the QR image of a short URL.
///
/// # Endpoint
///
/// `GET /{hash}/qr`
///
/// # Errors
///
/// - 404 Not Found if the hash is unknown or was created without `qr`
/// - 400 Bad Request (with `Retry-After`) while the image is still rendering
pub async fn qr_handler(
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let image = state.qr_service.get_qr(&hash).await?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        image.bytes.to_vec(),
    ))
}
