//! Short URL construction, assignment and resolution.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::entities::UrlMapping;
use crate::infrastructure::keygen::{KeyClient, KeyClientError};
use crate::infrastructure::search::{DocumentStore, DocumentStoreError};
use crate::utils::doc_id;

/// Errors reported by the URL assignment orchestrator.
#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("could not reserve custom slug")]
    SlugReservationFailed(#[source] KeyClientError),
    #[error("could not generate slug for short url")]
    SlugGenerationFailed(#[source] KeyClientError),
    #[error("could not assign short url to original url")]
    AssignmentFailed(#[source] DocumentStoreError),
    #[error("could not resolve short url")]
    ResolutionFailed(#[source] DocumentStoreError),
    #[error("stored mapping could not be decoded")]
    ContentCorrupt(#[source] serde_json::Error),
    #[error("could not refresh document index")]
    RefreshFailed(#[source] DocumentStoreError),
}

/// Service that turns keys into short URLs and binds them to originals.
///
/// Stateless across requests; the slug comes from the remote key service and
/// the mapping lives in the document store under a content-addressed id.
/// Every failure is terminal for the call — retry policy belongs to callers.
pub struct ShortenService {
    index: String,
    documents: Arc<dyn DocumentStore>,
    keys: Arc<dyn KeyClient>,
}

impl ShortenService {
    /// Creates a new orchestrator writing to the given document index.
    pub fn new(
        index: impl Into<String>,
        documents: Arc<dyn DocumentStore>,
        keys: Arc<dyn KeyClient>,
    ) -> Self {
        Self {
            index: index.into(),
            documents,
            keys,
        }
    }

    /// Builds a short URL for `short_host`, reserving the custom slug when
    /// one is given and requesting a generated slug otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::SlugReservationFailed`] if a custom slug
    /// cannot be reserved (including when it is already taken),
    /// [`ShortenError::SlugGenerationFailed`] if no slug can be generated.
    pub async fn construct_short_url(
        &self,
        short_host: &str,
        custom_slug: Option<&str>,
        slug_length: i32,
    ) -> Result<String, ShortenError> {
        let slug = match custom_slug {
            Some(slug) if !slug.is_empty() => {
                debug!(host = short_host, slug, "Reserving custom slug");
                self.keys
                    .create_key(short_host, slug)
                    .await
                    .map_err(|e| {
                        warn!(host = short_host, "Error reserving custom slug: {}", e);
                        ShortenError::SlugReservationFailed(e)
                    })?
            }
            _ => {
                debug!(host = short_host, slug_length, "Requesting generated slug");
                self.keys
                    .generate_key(short_host, slug_length)
                    .await
                    .map_err(|e| {
                        warn!(host = short_host, "Error generating slug: {}", e);
                        ShortenError::SlugGenerationFailed(e)
                    })?
            }
        };

        Ok(format!("{}/{}", short_host, slug))
    }

    /// Binds `short_url` to `original_url` in the document store.
    ///
    /// The document id is a pure function of the short URL, so a repeated
    /// assignment of the same short URL overwrites the previous mapping
    /// rather than duplicating it. A failure here does not roll back the
    /// already-allocated slug; an allocated-but-unassigned key is an accepted
    /// leak, since keys are never reused across attempts.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::AssignmentFailed`] on any store failure.
    pub async fn assign_short_url(
        &self,
        original_url: &str,
        short_url: &str,
    ) -> Result<(), ShortenError> {
        let id = doc_id::document_id(short_url);
        let mapping = UrlMapping::new(original_url, short_url);

        let content = serde_json::to_value(&mapping)
            .expect("url mapping serialization cannot fail");

        let committed_id = self
            .documents
            .put(&self.index, &id, content)
            .await
            .map_err(|e| {
                warn!(short_url, id, "Error storing mapping document: {}", e);
                ShortenError::AssignmentFailed(e)
            })?;

        info!(short_url, id = %committed_id, "Assigned short URL");
        Ok(())
    }

    /// Resolves a short URL back to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::ResolutionFailed`] if the store has no mapping
    /// or cannot be read, [`ShortenError::ContentCorrupt`] if the stored
    /// content does not decode.
    pub async fn resolve_short_url(&self, short_url: &str) -> Result<String, ShortenError> {
        let id = doc_id::document_id(short_url);

        let content = self.documents.get(&self.index, &id).await.map_err(|e| {
            debug!(short_url, id, "Error finding mapping document: {}", e);
            ShortenError::ResolutionFailed(e)
        })?;

        let mapping: UrlMapping = serde_json::from_value(content).map_err(|e| {
            warn!(short_url, "Error decoding mapping document: {}", e);
            ShortenError::ContentCorrupt(e)
        })?;

        debug!(short_url, original_url = %mapping.original_url, "Resolved short URL");
        Ok(mapping.original_url)
    }

    /// Builds a short URL and binds it to `original_url`, short-circuiting on
    /// the first failure; assignment is never attempted without a slug.
    pub async fn shorten(
        &self,
        original_url: &str,
        short_host: &str,
        custom_slug: Option<&str>,
        slug_length: i32,
    ) -> Result<String, ShortenError> {
        let short_url = self
            .construct_short_url(short_host, custom_slug, slug_length)
            .await?;

        self.assign_short_url(original_url, &short_url).await?;

        Ok(short_url)
    }

    /// Deletes and recreates the mapping index. Administrative only.
    pub async fn refresh_index(&self) -> Result<(), ShortenError> {
        self.documents
            .recreate(std::slice::from_ref(&self.index))
            .await
            .map_err(ShortenError::RefreshFailed)?;

        info!(index = %self.index, "Refreshed document index");
        Ok(())
    }

    /// Checks whether the document store is reachable.
    pub async fn probe(&self) -> bool {
        self.documents.probe().await
    }
}
