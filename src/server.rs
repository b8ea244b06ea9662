//! HTTP server initialization and runtime setup for both binaries.
//!
//! Handles store connections, migrations, startup health gating, and the
//! Axum server lifecycle.

use crate::api::routes::{keygen_router, shortener_router};
use crate::application::services::{KeygenService, ShortenService};
use crate::config::{KeygenConfig, ShortenerConfig};
use crate::infrastructure::keygen::HttpKeyClient;
use crate::infrastructure::persistence::{PgKeyRepository, PgSourceRepository};
use crate::infrastructure::search::EsDocumentStore;
use crate::state::{AppState, KeygenState};

use anyhow::Result;
use axum::extract::Request;
use axum::{Router, ServiceExt};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tower_http::normalize_path::NormalizePath;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Runs the key allocation service.
///
/// Connects to PostgreSQL, applies pending migrations and serves the key
/// endpoints. With `refresh_database` set, reverts all migrations, re-applies
/// them and exits instead of serving.
///
/// # Errors
///
/// Returns an error if the database connection, migrations, server bind or
/// server runtime fail.
pub async fn run_keygen(config: KeygenConfig, refresh_database: bool) -> Result<()> {
    let pool = PgPool::connect(&config.database_url).await?;
    tracing::info!("Connected to database");

    if refresh_database {
        MIGRATOR.undo(&pool, 0).await?;
        MIGRATOR.run(&pool).await?;
        tracing::info!("Successfully refreshed database");
        return Ok(());
    }

    MIGRATOR.run(&pool).await?;

    let pool = Arc::new(pool);
    let keygen = KeygenService::new(
        Arc::new(PgSourceRepository::new(pool.clone())),
        Arc::new(PgKeyRepository::new(pool.clone())),
    );

    let state = KeygenState {
        keygen: Arc::new(keygen),
        min_key_length: config.min_key_length,
        max_key_length: config.max_key_length,
        min_source_name_length: config.min_source_name_length,
    };

    serve(&config.listen_addr, keygen_router(state)).await
}

/// Runs the shortener app.
///
/// Waits for the document store to come up before doing anything else — it
/// can take the backing cluster a while to start, and nothing works without
/// it. With `refresh_index` set, recreates the mapping index and exits
/// instead of serving.
///
/// # Errors
///
/// Returns an error if the document store never becomes healthy within the
/// configured attempt budget, or if the server bind / runtime fails.
pub async fn run_shortener(config: ShortenerConfig, refresh_index: bool) -> Result<()> {
    let documents = Arc::new(EsDocumentStore::new(&config.elasticsearch_url));
    let keys = Arc::new(HttpKeyClient::new(&config.keygen_url));
    let shorten = Arc::new(ShortenService::new(
        config.es_index.clone(),
        documents,
        keys,
    ));

    wait_for_document_store(
        shorten.clone(),
        config.init_max_attempts,
        config.init_wait_seconds,
    )
    .await?;

    if refresh_index {
        shorten.refresh_index().await?;
        tracing::info!("Successfully refreshed index");
        return Ok(());
    }

    let state = AppState {
        shorten,
        short_host: config.short_host.clone(),
        min_slug_length: config.min_slug_length,
        max_slug_length: config.max_slug_length,
    };

    serve(&config.listen_addr, shortener_router(state)).await
}

/// Polls the document store until it answers, bounded by the attempt budget.
async fn wait_for_document_store(
    shorten: Arc<ShortenService>,
    max_attempts: usize,
    wait_seconds: u64,
) -> Result<()> {
    let strategy =
        FixedInterval::new(Duration::from_secs(wait_seconds)).take(max_attempts.saturating_sub(1));

    Retry::spawn(strategy, move || {
        let shorten = shorten.clone();
        async move {
            if shorten.probe().await {
                Ok(())
            } else {
                tracing::warn!("Document store not ready, retrying...");
                Err(())
            }
        }
    })
    .await
    .map_err(|_| anyhow::anyhow!("Could not verify document store health"))?;

    tracing::info!("Document store health verified");
    Ok(())
}

async fn serve(listen_addr: &str, app: NormalizePath<Router>) -> Result<()> {
    let addr: SocketAddr = listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
