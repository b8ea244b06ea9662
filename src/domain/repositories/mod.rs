//! Repository traits for the relational key ledger.

mod key_repository;
mod source_repository;

pub use key_repository::KeyRepository;
pub use source_repository::SourceRepository;

#[cfg(test)]
pub use key_repository::MockKeyRepository;
#[cfg(test)]
pub use source_repository::MockSourceRepository;

use thiserror::Error;

/// Errors surfaced by the relational store adapters.
///
/// A uniqueness-constraint rejection is the one condition callers react to
/// (it is how "already exists" is detected); everything else is opaque.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return RepositoryError::UniqueViolation;
        }

        RepositoryError::Database(e)
    }
}
