//! Document store trait and error types.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("document index write failed: {0}")]
    WriteFailed(String),
    #[error("document index read failed: {0}")]
    ReadFailed(String),
    #[error("document not found")]
    NotFound,
    #[error("could not decode document store response: {0}")]
    ResponseUnparseable(String),
    #[error("index administration failed: {0}")]
    AdminFailed(String),
}

/// Durable key-value store for short-URL mappings, keyed by document id.
///
/// The contract that matters here is read-after-write: a successful
/// [`DocumentStore::put`] must be visible to an immediately following
/// [`DocumentStore::get`], because resolution can happen right after
/// assignment. There is no compare-and-set; a second write to the same id
/// overwrites the first.
///
/// # Implementations
///
/// - [`crate::infrastructure::search::EsDocumentStore`] - Elasticsearch implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `content` under `id` into the named index and forces the write
    /// to be visible to subsequent reads before returning.
    ///
    /// Returns the id the store committed the document under.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::WriteFailed`] on transport errors,
    /// [`DocumentStoreError::ResponseUnparseable`] if the acknowledgment
    /// cannot be decoded.
    async fn put(&self, index: &str, id: &str, content: Value)
    -> Result<String, DocumentStoreError>;

    /// Fetches the content stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::NotFound`] if the store has no such id,
    /// [`DocumentStoreError::ReadFailed`] on transport errors,
    /// [`DocumentStoreError::ResponseUnparseable`] on decode failure.
    async fn get(&self, index: &str, id: &str) -> Result<Value, DocumentStoreError>;

    /// Deletes each named index if present, then creates it empty.
    ///
    /// Administrative only; never on the request path.
    async fn recreate(&self, indices: &[String]) -> Result<(), DocumentStoreError>;

    /// Connectivity check. Returns `false` on any failure; no data semantics.
    async fn probe(&self) -> bool;
}
