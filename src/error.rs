use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::{KeygenError, ShortenError};
use crate::infrastructure::keygen::KeyClientError;
use crate::infrastructure::search::DocumentStoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
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
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
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
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&errors).unwrap_or_else(|_| json!({})),
        )
    }
}

impl From<KeygenError> for AppError {
    fn from(e: KeygenError) -> Self {
        match e {
            KeygenError::KeyLengthInvalid => {
                AppError::bad_request("Key length must be positive", json!({}))
            }
            KeygenError::CustomKeyEmpty => {
                AppError::bad_request("Custom key cannot be empty", json!({}))
            }
            KeygenError::KeyAlreadyExists => AppError::conflict("Key already exists", json!({})),
            KeygenError::SourceResolutionFailed(cause) => AppError::internal(
                "Could not resolve source for key",
                json!({ "cause": cause.to_string() }),
            ),
            KeygenError::KeyPersistenceFailed(cause) => AppError::internal(
                "Could not save key for source",
                json!({ "cause": cause.to_string() }),
            ),
        }
    }
}

impl From<ShortenError> for AppError {
    fn from(e: ShortenError) -> Self {
        match e {
            // A rejected reservation means the slug is taken upstream; everything
            // else on that path is an upstream fault.
            ShortenError::SlugReservationFailed(KeyClientError::Rejected { status: 409 }) => {
                AppError::conflict("Custom slug is already taken", json!({}))
            }
            ShortenError::SlugReservationFailed(cause) => AppError::internal(
                "Could not reserve custom slug",
                json!({ "cause": cause.to_string() }),
            ),
            ShortenError::SlugGenerationFailed(cause) => AppError::internal(
                "Could not generate slug for short URL",
                json!({ "cause": cause.to_string() }),
            ),
            ShortenError::AssignmentFailed(cause) => AppError::internal(
                "Could not assign short URL to original URL",
                json!({ "cause": cause.to_string() }),
            ),
            ShortenError::ResolutionFailed(DocumentStoreError::NotFound) => {
                AppError::not_found("Short URL is not assigned", json!({}))
            }
            ShortenError::ResolutionFailed(cause) => AppError::internal(
                "Could not resolve short URL",
                json!({ "cause": cause.to_string() }),
            ),
            ShortenError::ContentCorrupt(cause) => AppError::internal(
                "Stored mapping could not be decoded",
                json!({ "cause": cause.to_string() }),
            ),
            ShortenError::RefreshFailed(cause) => AppError::internal(
                "Could not refresh document index",
                json!({ "cause": cause.to_string() }),
            ),
        }
    }
}
