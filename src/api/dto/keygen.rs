//! DTOs for the key service endpoints.

use serde::{Deserialize, Serialize};

/// Request for a freshly generated key.
///
/// Length bounds are configuration-driven and checked in the handler.
#[derive(Debug, Deserialize)]
pub struct GenerateKeyRequest {
    pub source_name: String,
    pub key_length: i32,
}

/// Request to register a caller-chosen key.
#[derive(Debug, Deserialize)]
pub struct NewKeyRequest {
    pub source_name: String,
    pub key: String,
}

/// Response carrying the committed key.
#[derive(Debug, Serialize)]
pub struct KeyResponse {
    pub key: String,
}
