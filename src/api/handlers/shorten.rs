//! Handler for short URL creation.

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::link::{LinkProperties, ShortUrlResponse, ShortenRequest};
use crate::application::services::CreateShortUrl;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL and schedules its background work.
///
/// # Endpoint
///
/// `POST /api/link`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "sponsor": "acme",   // optional
///   "qr": true,          // optional, default false
///   "limit": 100         // optional, redirects per hour; <= 0 is unlimited
/// }
/// ```
///
/// # Response
///
/// `201 Created` with a `Location` header pointing at the short URL:
///
/// ```json
/// {
///   "hash": "0a1b2c3d",
///   "url": "http://localhost:8080/0a1b2c3d",
///   "target": "https://example.com/",
///   "created": "2024-01-01T00:00:00Z",
///   "qr": "http://localhost:8080/0a1b2c3d/qr",
///   "limit": 100,
///   "properties": { "safe": true }
/// }
/// ```
///
/// The target is not probed before responding; redirects are refused until
/// the background check has confirmed it.
///
/// # Errors
///
/// - 400 Bad Request if validation fails
/// - 503 Service Unavailable (with `Retry-After`) if a work queue is full
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<ShortenRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let limit = payload.redirect_limit();

    let short_url = state
        .link_service
        .create_short_url(CreateShortUrl {
            url: payload.url,
            sponsor: payload.sponsor,
            qr: payload.qr,
            limit,
            ip: Some(addr.ip().to_string()),
        })
        .await?;

    let url = state.link_service.short_url(&short_url.hash);
    let properties = short_url.properties;
    let response = ShortUrlResponse {
        qr: properties.qr.then(|| format!("{}/qr", url)),
        limit: (properties.limit > 0).then_some(properties.limit),
        sponsor: properties.sponsor,
        properties: LinkProperties {
            safe: properties.safe,
        },
        target: short_url.redirection.target,
        created: short_url.created,
        hash: short_url.hash,
        url: url.clone(),
    };

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, url)],
        Json(response),
    ))
}
