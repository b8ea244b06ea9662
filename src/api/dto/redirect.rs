//! DTOs for the external redirect endpoint.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

/// Accepted shape of a full short URL: scheme, hostname, one slug segment.
static SHORT_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(http|https)://[a-zA-Z0-9.]+/[a-zA-Z0-9\-_]+$").unwrap());

/// Request to resolve a short URL and redirect to its original.
#[derive(Debug, Deserialize, Validate)]
pub struct RedirectRequest {
    #[validate(regex(path = "*SHORT_URL_REGEX", message = "Invalid short URL"))]
    pub short_url: String,
}
