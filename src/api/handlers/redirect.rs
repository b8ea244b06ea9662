//! Handlers for short URL redirects.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;
use tracing::info;
use validator::Validate;

use crate::api::dto::redirect::RedirectRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Path segments recognizable as slugs.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\-_]+$").unwrap());

/// Resolves an explicitly supplied short URL.
///
/// # Endpoint
///
/// `POST /url/redirect` with body `{"short_url": "..."}`
///
/// Answers `302 Found` with the original URL in `Location`; the short URL may
/// point at any host this deployment serves.
pub async fn external_redirect_handler(
    State(state): State<AppState>,
    Json(payload): Json<RedirectRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let original_url = state.shorten.resolve_short_url(&payload.short_url).await?;

    info!(short_url = %payload.short_url, original_url = %original_url, "Forwarding");
    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}

/// Resolves a slug served from this deployment's own host.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// The full short URL is reconstructed from the configured internal host
/// before lookup. Answers `302 Found` on success, 404 for unknown slugs.
pub async fn internal_redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !SLUG_REGEX.is_match(&slug) {
        return Err(AppError::not_found(
            "Short URL is not assigned",
            json!({ "slug": slug }),
        ));
    }

    let short_url = format!("{}/{}", state.short_host.trim_end_matches('/'), slug);

    let original_url = state.shorten.resolve_short_url(&short_url).await?;

    info!(short_url = %short_url, original_url = %original_url, "Forwarding");
    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
