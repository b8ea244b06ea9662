//! Repository trait for the key ledger.

use super::RepositoryError;
use async_trait::async_trait;

/// Ledger of committed keys.
///
/// `raw_key` is unique across the whole ledger, not per source. Rows are
/// immutable once written and are never read back; the uniqueness constraint
/// alone decides whether an insert wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgKeyRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyRepository: Send + Sync {
    /// Records a key for a source and returns the generated row id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::UniqueViolation`] if the key value is
    /// already committed, [`RepositoryError::Database`] on any other failure.
    async fn insert(&self, raw_key: &str, source_id: i64) -> Result<i64, RepositoryError>;
}
