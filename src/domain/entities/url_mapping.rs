use serde::{Deserialize, Serialize};

/// The document content stored per short URL.
///
/// Serialized verbatim into the document index under an id derived from the
/// short URL, and decoded back on resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub original_url: String,
    pub short_url: String,
}

impl UrlMapping {
    pub fn new(original_url: impl Into<String>, short_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            short_url: short_url.into(),
        }
    }
}
