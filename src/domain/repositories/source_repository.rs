//! Repository trait for slug request sources.

use super::RepositoryError;
use async_trait::async_trait;

/// Registry of named originators of key requests.
///
/// Registration relies on the store's uniqueness constraint rather than a
/// lookup-then-insert sequence: [`SourceRepository::insert`] is attempted
/// first, and a [`RepositoryError::UniqueViolation`] tells the caller the
/// source already exists, at which point
/// [`SourceRepository::find_active_by_name`] recovers the id. The constraint
/// is what serializes concurrent first-time registrations of the same name.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSourceRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// Inserts a new source and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::UniqueViolation`] if the name is already
    /// registered, [`RepositoryError::Database`] on any other failure.
    async fn insert(&self, name: &str) -> Result<i64, RepositoryError>;

    /// Looks up an active source by name.
    ///
    /// Deactivated sources are invisible here; a name that only exists as an
    /// inactive row resolves to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] on database errors.
    async fn find_active_by_name(&self, name: &str) -> Result<Option<i64>, RepositoryError>;
}
