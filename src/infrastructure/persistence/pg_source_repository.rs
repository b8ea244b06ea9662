//! PostgreSQL implementation of the source registry.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::domain::repositories::{RepositoryError, SourceRepository};

/// PostgreSQL repository for slug request sources.
///
/// The unique constraint on `sources.name` is what makes concurrent
/// first-time registrations safe; see [`SourceRepository`].
pub struct PgSourceRepository {
    pool: Arc<PgPool>,
}

impl PgSourceRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SourceRepository for PgSourceRepository {
    async fn insert(&self, name: &str) -> Result<i64, RepositoryError> {
        let id: i64 = sqlx::query_scalar("INSERT INTO sources (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(self.pool.as_ref())
            .await?;

        debug!(name, id, "Inserted new source");
        Ok(id)
    }

    async fn find_active_by_name(&self, name: &str) -> Result<Option<i64>, RepositoryError> {
        let id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM sources WHERE name = $1 AND is_active IS TRUE")
                .bind(name)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(id)
    }
}
