//! Handler for the URL shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL, optionally under a caller-chosen slug or host.
///
/// # Endpoint
///
/// `POST /url/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/some/long/page",
///   "short_url_host": "https://sho.rt",   // optional
///   "custom_slug": "mine",                // optional
///   "slug_length": 8                      // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 on format or bounds violations, 409 when the custom slug is
/// already taken, 500 when slug allocation or assignment fails upstream.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let payload = payload.normalized();
    payload.validate()?;

    if let Some(slug) = payload.custom_slug.as_deref() {
        let length = slug.len() as i32;
        if length < state.min_slug_length || length > state.max_slug_length {
            return Err(AppError::bad_request(
                format!(
                    "Custom slug length must be between {} and {}",
                    state.min_slug_length, state.max_slug_length
                ),
                json!({ "custom_slug": slug }),
            ));
        }
    }

    if let Some(length) = payload.slug_length
        && length > 0
        && (length < state.min_slug_length || length > state.max_slug_length)
    {
        return Err(AppError::bad_request(
            format!(
                "Slug length must be between {} and {}",
                state.min_slug_length, state.max_slug_length
            ),
            json!({ "slug_length": length }),
        ));
    }

    let short_host = payload
        .short_url_host
        .clone()
        .unwrap_or_else(|| state.short_host.clone());
    let slug_length = match payload.slug_length {
        Some(length) if length > 0 => length,
        _ => state.min_slug_length,
    };

    let short_url = state
        .shorten
        .shorten(
            &payload.original_url,
            &short_host,
            payload.custom_slug.as_deref(),
            slug_length,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            original_url: payload.original_url,
            short_url,
        }),
    ))
}
