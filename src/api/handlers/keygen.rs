//! Handlers for the key service endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;

use crate::api::dto::keygen::{GenerateKeyRequest, KeyResponse, NewKeyRequest};
use crate::error::AppError;
use crate::state::KeygenState;

/// Generates and commits a fresh key.
///
/// # Endpoint
///
/// `POST /key/generate` with body `{"source_name": "...", "key_length": 8}`
///
/// # Errors
///
/// Returns 400 when the requested length or source name is out of bounds,
/// 500 when the key cannot be resolved or persisted. A generated key losing
/// the uniqueness race is a 500; callers re-invoke for a new draw.
pub async fn generate_key_handler(
    State(state): State<KeygenState>,
    Json(payload): Json<GenerateKeyRequest>,
) -> Result<(StatusCode, Json<KeyResponse>), AppError> {
    if payload.key_length < state.min_key_length || payload.key_length > state.max_key_length {
        return Err(AppError::bad_request(
            format!(
                "Key length must be between {} and {}",
                state.min_key_length, state.max_key_length
            ),
            json!({ "key_length": payload.key_length }),
        ));
    }

    if payload.source_name.len() < state.min_source_name_length {
        return Err(AppError::bad_request(
            format!(
                "Source name must be at least {} characters",
                state.min_source_name_length
            ),
            json!({ "source_name": payload.source_name }),
        ));
    }

    let key = state
        .keygen
        .generate_key(&payload.source_name, payload.key_length)
        .await?;

    Ok((StatusCode::CREATED, Json(KeyResponse { key })))
}

/// Commits a caller-chosen key.
///
/// # Endpoint
///
/// `POST /key/new` with body `{"source_name": "...", "key": "..."}`
///
/// An empty source name is allowed and lands in the unnamed source bucket;
/// a non-empty one must meet the configured minimum length.
///
/// # Errors
///
/// Returns 400 on bounds violations, 409 when the key is already taken,
/// 500 on any other persistence failure.
pub async fn new_key_handler(
    State(state): State<KeygenState>,
    Json(payload): Json<NewKeyRequest>,
) -> Result<(StatusCode, Json<KeyResponse>), AppError> {
    let key_length = payload.key.len() as i32;
    if key_length < state.min_key_length || key_length > state.max_key_length {
        return Err(AppError::bad_request(
            format!(
                "Key length must be between {} and {}",
                state.min_key_length, state.max_key_length
            ),
            json!({ "key": payload.key }),
        ));
    }

    if !payload.source_name.is_empty() && payload.source_name.len() < state.min_source_name_length {
        return Err(AppError::bad_request(
            format!(
                "Source name must be at least {} characters",
                state.min_source_name_length
            ),
            json!({ "source_name": payload.source_name }),
        ));
    }

    state
        .keygen
        .store_custom_key(&payload.source_name, &payload.key)
        .await?;

    Ok((StatusCode::CREATED, Json(KeyResponse { key: payload.key })))
}
