//! PostgreSQL implementation of the key ledger.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::domain::repositories::{KeyRepository, RepositoryError};

/// PostgreSQL repository for committed keys.
pub struct PgKeyRepository {
    pool: Arc<PgPool>,
}

impl PgKeyRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyRepository for PgKeyRepository {
    async fn insert(&self, raw_key: &str, source_id: i64) -> Result<i64, RepositoryError> {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO keys (raw_key, source_id) VALUES ($1, $2) RETURNING id")
                .bind(raw_key)
                .bind(source_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        debug!(id, source_id, "Inserted new key");
        Ok(id)
    }
}
