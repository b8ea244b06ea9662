//! Handler for the index route.

/// Usage hint for callers landing on the bare host.
pub async fn index_handler() -> &'static str {
    "Use a shortened link or POST /url/shorten to shorten URLs."
}
