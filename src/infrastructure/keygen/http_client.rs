//! REST implementation of the key service client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::client::{KeyClient, KeyClientError};

/// Key service client over HTTP.
///
/// Both operations POST JSON and expect `201 Created`; any other status is an
/// application-level rejection, surfaced with the status attached.
pub struct HttpKeyClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateKeyRequest<'a> {
    source_name: &'a str,
    key_length: i32,
}

#[derive(Debug, Serialize)]
struct NewKeyRequest<'a> {
    source_name: &'a str,
    key: &'a str,
}

#[derive(Debug, Deserialize)]
struct KeyEnvelope {
    key: String,
}

impl HttpKeyClient {
    /// Creates a client for the key service at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl KeyClient for HttpKeyClient {
    async fn generate_key(
        &self,
        source_name: &str,
        key_length: i32,
    ) -> Result<String, KeyClientError> {
        let response = self
            .http
            .post(self.endpoint("/key/generate"))
            .json(&GenerateKeyRequest {
                source_name,
                key_length,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Error posting /key/generate: {}", e);
                KeyClientError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            warn!("[{}] Key was not generated", status.as_u16());
            return Err(KeyClientError::Rejected {
                status: status.as_u16(),
            });
        }

        let envelope: KeyEnvelope = response.json().await.map_err(|e| {
            error!("Error parsing the key generation response body: {}", e);
            KeyClientError::ResponseUnparseable(e.to_string())
        })?;

        debug!("[{}] Key generated", status.as_u16());
        Ok(envelope.key)
    }

    async fn create_key(&self, source_name: &str, key: &str) -> Result<String, KeyClientError> {
        let response = self
            .http
            .post(self.endpoint("/key/new"))
            .json(&NewKeyRequest { source_name, key })
            .send()
            .await
            .map_err(|e| {
                error!("Error posting /key/new: {}", e);
                KeyClientError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            warn!("[{}] Key was not created", status.as_u16());
            return Err(KeyClientError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!("[{}] Key created", status.as_u16());
        Ok(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_key_request_shape() {
        let body = serde_json::to_value(GenerateKeyRequest {
            source_name: "http://sho.rt",
            key_length: 8,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({ "source_name": "http://sho.rt", "key_length": 8 })
        );
    }

    #[test]
    fn test_new_key_request_shape() {
        let body = serde_json::to_value(NewKeyRequest {
            source_name: "http://sho.rt",
            key: "mine",
        })
        .unwrap();

        assert_eq!(body, json!({ "source_name": "http://sho.rt", "key": "mine" }));
    }

    #[test]
    fn test_key_envelope_decodes() {
        let envelope: KeyEnvelope = serde_json::from_value(json!({ "key": "c2Fsdg" })).unwrap();
        assert_eq!(envelope.key, "c2Fsdg");
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = HttpKeyClient::new("http://keygen:5000/");
        assert_eq!(
            client.endpoint("/key/generate"),
            "http://keygen:5000/key/generate"
        );
    }
}
