//! Router configuration for both services.
//!
//! # Shortener routes
//!
//! - `GET  /`             - Usage hint
//! - `GET  /healthcheck`  - Document store health (public)
//! - `POST /url/shorten`  - Shorten a URL
//! - `POST /url/redirect` - Resolve an explicit short URL
//! - `GET  /{slug}`       - Resolve a slug on the internal host
//!
//! # Key service routes
//!
//! - `POST /key/generate` - Allocate a fresh key
//! - `POST /key/new`      - Register a caller-chosen key
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    external_redirect_handler, generate_key_handler, health_handler, index_handler,
    internal_redirect_handler, new_key_handler, shorten_handler,
};
use crate::api::middleware::tracing;
use crate::state::{AppState, KeygenState};
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Shortener routes without middleware; used directly by handler tests.
pub fn shortener_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthcheck", get(health_handler))
        .route("/url/shorten", post(shorten_handler))
        .route("/url/redirect", post(external_redirect_handler))
        .route("/{slug}", get(internal_redirect_handler))
        .with_state(state)
}

/// Key service routes without middleware; used directly by handler tests.
pub fn keygen_routes(state: KeygenState) -> Router {
    Router::new()
        .route("/key/generate", post(generate_key_handler))
        .route("/key/new", post(new_key_handler))
        .with_state(state)
}

/// Constructs the shortener application router with all middleware.
pub fn shortener_router(state: AppState) -> NormalizePath<Router> {
    let router = shortener_routes(state).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Constructs the key service router with all middleware.
pub fn keygen_router(state: KeygenState) -> NormalizePath<Router> {
    let router = keygen_routes(state).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
