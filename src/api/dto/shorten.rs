//! DTOs for the URL shortening endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Accepted shape of an original URL.
static ORIGINAL_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(http|https)://[a-zA-Z0-9./?=_-]+$").unwrap());

/// Accepted shape of a short-URL host: scheme plus bare hostname.
static SHORT_HOST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(http|https)://[a-zA-Z0-9.]+$").unwrap());

/// Request to shorten a URL.
///
/// Host, slug and slug length are all optional; defaults come from
/// configuration. Slug and slug-length bounds are config-driven and checked
/// in the handler.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten (must be HTTP/HTTPS).
    #[validate(regex(path = "*ORIGINAL_URL_REGEX", message = "Invalid original URL"))]
    pub original_url: String,

    /// Optional short-URL host override (otherwise the configured host).
    #[validate(regex(path = "*SHORT_HOST_REGEX", message = "Invalid short URL host"))]
    pub short_url_host: Option<String>,

    /// Optional caller-chosen slug.
    pub custom_slug: Option<String>,

    /// Optional generated-slug length (otherwise the configured minimum).
    pub slug_length: Option<i32>,
}

impl ShortenRequest {
    /// Collapses empty optional strings to `None` so that `""` means
    /// "use the default" rather than tripping format validation.
    pub fn normalized(mut self) -> Self {
        if self.short_url_host.as_deref() == Some("") {
            self.short_url_host = None;
        }
        if self.custom_slug.as_deref() == Some("") {
            self.custom_slug = None;
        }
        self
    }
}

/// Response carrying the assigned short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
}
