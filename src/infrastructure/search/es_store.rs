//! Elasticsearch implementation of the document store.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::store::{DocumentStore, DocumentStoreError};

/// Document store backed by the Elasticsearch REST API.
///
/// Writes use `?refresh=true` so an indexed document is searchable before the
/// call returns. Response bodies are decoded into the minimal envelopes below;
/// HTTP-level error statuses are not treated specially — the envelope content
/// (`found`, `result`) decides the outcome, matching how the upstream API
/// reports misses.
pub struct EsDocumentStore {
    http: Client,
    base_url: String,
}

/// Acknowledgment envelope for index requests.
#[derive(Debug, Deserialize)]
struct IndexAck {
    #[serde(default)]
    result: String,
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_version", default)]
    version: i64,
}

/// Envelope for get-document responses.
///
/// Elasticsearch reports a missing document (and a missing index) with a body
/// that lacks `found: true`, so every field defaults.
#[derive(Debug, Deserialize)]
struct GetAck {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(rename = "_version", default)]
    version: i64,
    #[serde(rename = "_source")]
    source: Option<Value>,
}

/// Envelope for the cluster info endpoint.
#[derive(Debug, Deserialize)]
struct InfoAck {
    version: InfoVersion,
}

#[derive(Debug, Deserialize)]
struct InfoVersion {
    number: String,
}

impl EsDocumentStore {
    /// Creates a store client for the given Elasticsearch base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn doc_url(&self, index: &str, id: &str) -> String {
        format!("{}/{}/_doc/{}", self.base_url, index, id)
    }

    fn index_url(&self, index: &str) -> String {
        format!("{}/{}", self.base_url, index)
    }
}

#[async_trait]
impl DocumentStore for EsDocumentStore {
    async fn put(
        &self,
        index: &str,
        id: &str,
        content: Value,
    ) -> Result<String, DocumentStoreError> {
        let response = self
            .http
            .put(self.doc_url(index, id))
            .query(&[("refresh", "true")])
            .json(&content)
            .send()
            .await
            .map_err(|e| {
                error!(index, id, "Error indexing document: {}", e);
                DocumentStoreError::WriteFailed(e.to_string())
            })?;

        let status = response.status();
        let ack: IndexAck = response.json().await.map_err(|e| {
            error!(index, id, "Error parsing the index response body: {}", e);
            DocumentStoreError::ResponseUnparseable(e.to_string())
        })?;

        debug!(
            index,
            result = %ack.result,
            id = %ack.id,
            version = ack.version,
            "[{}] Indexed document",
            status.as_u16()
        );
        Ok(ack.id)
    }

    async fn get(&self, index: &str, id: &str) -> Result<Value, DocumentStoreError> {
        let response = self
            .http
            .get(self.doc_url(index, id))
            .send()
            .await
            .map_err(|e| {
                error!(index, id, "Error fetching document: {}", e);
                DocumentStoreError::ReadFailed(e.to_string())
            })?;

        let status = response.status();
        let ack: GetAck = response.json().await.map_err(|e| {
            error!(index, id, "Error parsing the get response body: {}", e);
            DocumentStoreError::ResponseUnparseable(e.to_string())
        })?;

        if !ack.found {
            debug!(index, id, "[{}] Document not found", status.as_u16());
            return Err(DocumentStoreError::NotFound);
        }

        debug!(
            index,
            id = %ack.id,
            version = ack.version,
            "[{}] Retrieved document",
            status.as_u16()
        );
        ack.source
            .ok_or_else(|| DocumentStoreError::ResponseUnparseable("missing _source".to_string()))
    }

    async fn recreate(&self, indices: &[String]) -> Result<(), DocumentStoreError> {
        for index in indices {
            // A 404 on delete is fine; only transport failures abort.
            let deleted = self
                .http
                .delete(self.index_url(index))
                .send()
                .await
                .map_err(|e| {
                    error!(index, "Error deleting index: {}", e);
                    DocumentStoreError::AdminFailed(e.to_string())
                })?;
            info!(index, "[{}] Deleted index", deleted.status().as_u16());

            let created = self
                .http
                .put(self.index_url(index))
                .send()
                .await
                .map_err(|e| {
                    error!(index, "Error creating index: {}", e);
                    DocumentStoreError::AdminFailed(e.to_string())
                })?;
            info!(index, "[{}] Created index", created.status().as_u16());
        }

        Ok(())
    }

    async fn probe(&self) -> bool {
        let response = match self.http.get(&self.base_url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Elasticsearch probe failed: {}", e);
                return false;
            }
        };

        match response.json::<InfoAck>().await {
            Ok(info) => {
                debug!(server = %info.version.number, "Elasticsearch reachable");
                true
            }
            Err(e) => {
                warn!("Error parsing the info response body: {}", e);
                false
            }
        }
    }
}
