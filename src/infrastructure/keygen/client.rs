//! Key service client trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur talking to the key service.
///
/// Transport failures and application-level rejections are deliberately kept
/// apart: a rejection carries the upstream status so callers can tell an
/// expected conflict from an upstream fault.
#[derive(Debug, Error)]
pub enum KeyClientError {
    #[error("key service unreachable: {0}")]
    Unreachable(String),
    #[error("key service rejected the request: status {status}")]
    Rejected { status: u16 },
    #[error("could not decode key service response: {0}")]
    ResponseUnparseable(String),
}

/// Client for the key allocation service.
///
/// # Implementations
///
/// - [`crate::infrastructure::keygen::HttpKeyClient`] - REST implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyClient: Send + Sync {
    /// Requests a freshly generated key of at least `key_length` characters,
    /// registered under `source_name`.
    async fn generate_key(
        &self,
        source_name: &str,
        key_length: i32,
    ) -> Result<String, KeyClientError>;

    /// Registers a caller-chosen key under `source_name` and returns it.
    ///
    /// # Errors
    ///
    /// A key that is already taken surfaces as [`KeyClientError::Rejected`]
    /// with a conflict status.
    async fn create_key(&self, source_name: &str, key: &str) -> Result<String, KeyClientError>;
}
