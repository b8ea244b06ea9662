use std::sync::Arc;

use crate::application::services::{KeygenService, ShortenService};

/// Shared state for the shortener app.
///
/// Holds the orchestrator plus the request-validation bounds that come from
/// configuration; all durable state lives behind the service.
#[derive(Clone)]
pub struct AppState {
    pub shorten: Arc<ShortenService>,
    pub short_host: String,
    pub min_slug_length: i32,
    pub max_slug_length: i32,
}

/// Shared state for the key service.
#[derive(Clone)]
pub struct KeygenState {
    pub keygen: Arc<KeygenService>,
    pub min_key_length: i32,
    pub max_key_length: i32,
    pub min_source_name_length: usize,
}
