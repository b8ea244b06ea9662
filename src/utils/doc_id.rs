//! Content-addressed document ids.

use sha2::{Digest, Sha256};

/// Derives the document id for a short URL.
///
/// The id is the lowercase hex SHA-256 of the short-URL string, so the same
/// short URL always addresses the same document regardless of write order.
pub fn document_id(short_url: &str) -> String {
    hex::encode(Sha256::digest(short_url.as_bytes()))
}
