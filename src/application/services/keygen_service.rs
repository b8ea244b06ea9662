//! Key allocation service.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::repositories::{KeyRepository, RepositoryError, SourceRepository};
use crate::utils::random_key;

/// Errors reported by the key allocator.
///
/// [`KeygenError::KeyAlreadyExists`] is reserved for conflicts on a
/// caller-chosen key; a conflict on a *generated* key is an internal anomaly
/// and surfaces as [`KeygenError::KeyPersistenceFailed`] like any other
/// ledger failure.
#[derive(Debug, Error)]
pub enum KeygenError {
    #[error("key length must be positive")]
    KeyLengthInvalid,
    #[error("custom key cannot be empty")]
    CustomKeyEmpty,
    #[error("could not resolve source for key")]
    SourceResolutionFailed(#[source] RepositoryError),
    #[error("key already exists")]
    KeyAlreadyExists,
    #[error("could not save key for source")]
    KeyPersistenceFailed(#[source] RepositoryError),
}

/// Service that allocates unique keys against the relational ledger.
///
/// Composes the source registry, the key ledger and the random generator.
/// There is no regenerate-and-retry on collision: a generated key that loses
/// the uniqueness race is reported as a failure and the caller re-invokes.
pub struct KeygenService {
    sources: Arc<dyn SourceRepository>,
    keys: Arc<dyn KeyRepository>,
}

impl KeygenService {
    /// Creates a new key allocation service.
    pub fn new(sources: Arc<dyn SourceRepository>, keys: Arc<dyn KeyRepository>) -> Self {
        Self { sources, keys }
    }

    /// Generates a random key of at least `key_length` characters and commits
    /// it to the ledger under `source_name`.
    ///
    /// # Errors
    ///
    /// Returns [`KeygenError::KeyLengthInvalid`] if `key_length < 1`,
    /// [`KeygenError::SourceResolutionFailed`] if the source cannot be
    /// resolved or created, [`KeygenError::KeyPersistenceFailed`] if the key
    /// cannot be committed (including losing the uniqueness race).
    pub async fn generate_key(
        &self,
        source_name: &str,
        key_length: i32,
    ) -> Result<String, KeygenError> {
        if key_length < 1 {
            return Err(KeygenError::KeyLengthInvalid);
        }

        let source_id = self.resolve_source(source_name).await?;

        let key = random_key::generate_key(key_length as usize);

        match self.keys.insert(&key, source_id).await {
            Ok(id) => {
                info!(source = source_name, id, "Generated key committed");
                Ok(key)
            }
            Err(e) => {
                warn!(source = source_name, "Error saving generated key: {}", e);
                Err(KeygenError::KeyPersistenceFailed(e))
            }
        }
    }

    /// Commits a caller-chosen key to the ledger under `source_name`.
    ///
    /// # Errors
    ///
    /// Returns [`KeygenError::CustomKeyEmpty`] for an empty key,
    /// [`KeygenError::KeyAlreadyExists`] if the key is already committed,
    /// [`KeygenError::KeyPersistenceFailed`] on any other ledger failure.
    pub async fn store_custom_key(&self, source_name: &str, key: &str) -> Result<(), KeygenError> {
        if key.is_empty() {
            return Err(KeygenError::CustomKeyEmpty);
        }

        let source_id = self.resolve_source(source_name).await?;

        match self.keys.insert(key, source_id).await {
            Ok(id) => {
                info!(source = source_name, id, "Custom key committed");
                Ok(())
            }
            Err(RepositoryError::UniqueViolation) => {
                debug!(source = source_name, "Custom key already exists");
                Err(KeygenError::KeyAlreadyExists)
            }
            Err(e) => {
                warn!(source = source_name, "Error saving custom key: {}", e);
                Err(KeygenError::KeyPersistenceFailed(e))
            }
        }
    }

    /// Resolves a source name to its id, creating the source if needed.
    ///
    /// The insert goes first; a uniqueness rejection means the source already
    /// exists and the id is recovered by lookup. The constraint is the sole
    /// arbiter under concurrent first-time registrations — a lookup-then-insert
    /// here would reintroduce the race the constraint exists to close.
    async fn resolve_source(&self, source_name: &str) -> Result<i64, KeygenError> {
        match self.sources.insert(source_name).await {
            Ok(id) => {
                info!(source = source_name, id, "Registered new source");
                Ok(id)
            }
            Err(RepositoryError::UniqueViolation) => {
                debug!(source = source_name, "Source already exists, retrieving id");
                self.sources
                    .find_active_by_name(source_name)
                    .await
                    .map_err(KeygenError::SourceResolutionFailed)?
                    .ok_or_else(|| {
                        warn!(source = source_name, "Source exists but is not active");
                        KeygenError::SourceResolutionFailed(RepositoryError::Database(
                            sqlx::Error::RowNotFound,
                        ))
                    })
            }
            Err(e) => {
                warn!(source = source_name, "Error adding new source: {}", e);
                Err(KeygenError::SourceResolutionFailed(e))
            }
        }
    }
}
