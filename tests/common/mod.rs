#![allow(dead_code)]

//! In-memory fakes standing in for PostgreSQL, Elasticsearch and the key
//! service, so handler and flow tests run the real services end to end
//! without external systems.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use shortkey::application::services::{KeygenError, KeygenService, ShortenService};
use shortkey::domain::repositories::{KeyRepository, RepositoryError, SourceRepository};
use shortkey::infrastructure::keygen::{KeyClient, KeyClientError};
use shortkey::infrastructure::search::{DocumentStore, DocumentStoreError};
use shortkey::state::{AppState, KeygenState};

/// Document store fake with the same read-after-write and overwrite
/// semantics as the Elasticsearch adapter.
pub struct MemoryDocumentStore {
    docs: Mutex<HashMap<(String, String), Value>>,
    healthy: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            docs: Mutex::new(HashMap::new()),
            healthy: AtomicBool::new(true),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn document_count(&self) -> usize {
        self.docs.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(
        &self,
        index: &str,
        id: &str,
        content: Value,
    ) -> Result<String, DocumentStoreError> {
        self.docs
            .lock()
            .unwrap()
            .insert((index.to_string(), id.to_string()), content);
        Ok(id.to_string())
    }

    async fn get(&self, index: &str, id: &str) -> Result<Value, DocumentStoreError> {
        self.docs
            .lock()
            .unwrap()
            .get(&(index.to_string(), id.to_string()))
            .cloned()
            .ok_or(DocumentStoreError::NotFound)
    }

    async fn recreate(&self, indices: &[String]) -> Result<(), DocumentStoreError> {
        self.docs
            .lock()
            .unwrap()
            .retain(|(index, _), _| !indices.contains(index));
        Ok(())
    }

    async fn probe(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

struct SourceRow {
    id: i64,
    name: String,
    is_active: bool,
}

/// Source registry fake enforcing the name uniqueness constraint.
pub struct MemorySourceRepository {
    rows: Mutex<Vec<SourceRow>>,
    next_id: AtomicI64,
}

impl MemorySourceRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn deactivate(&self, name: &str) {
        for row in self.rows.lock().unwrap().iter_mut() {
            if row.name == name {
                row.is_active = false;
            }
        }
    }
}

#[async_trait]
impl SourceRepository for MemorySourceRepository {
    async fn insert(&self, name: &str) -> Result<i64, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|row| row.name == name) {
            return Err(RepositoryError::UniqueViolation);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(SourceRow {
            id,
            name: name.to_string(),
            is_active: true,
        });
        Ok(id)
    }

    async fn find_active_by_name(&self, name: &str) -> Result<Option<i64>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.name == name && row.is_active)
            .map(|row| row.id))
    }
}

struct KeyRow {
    id: i64,
    raw_key: String,
    source_id: i64,
}

/// Key ledger fake enforcing global raw-key uniqueness.
pub struct MemoryKeyRepository {
    rows: Mutex<Vec<KeyRow>>,
    next_id: AtomicI64,
}

impl MemoryKeyRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl KeyRepository for MemoryKeyRepository {
    async fn insert(&self, raw_key: &str, source_id: i64) -> Result<i64, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|row| row.raw_key == raw_key) {
            return Err(RepositoryError::UniqueViolation);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.push(KeyRow {
            id,
            raw_key: raw_key.to_string(),
            source_id,
        });
        Ok(id)
    }
}

/// Key service client running a real [`KeygenService`] in process, mapping
/// its errors the way the HTTP boundary would.
pub struct LocalKeyClient {
    service: KeygenService,
}

impl LocalKeyClient {
    pub fn new(service: KeygenService) -> Self {
        Self { service }
    }

    fn map_error(e: KeygenError) -> KeyClientError {
        let status = match e {
            KeygenError::KeyLengthInvalid | KeygenError::CustomKeyEmpty => 400,
            KeygenError::KeyAlreadyExists => 409,
            KeygenError::SourceResolutionFailed(_) | KeygenError::KeyPersistenceFailed(_) => 500,
        };
        KeyClientError::Rejected { status }
    }
}

#[async_trait]
impl KeyClient for LocalKeyClient {
    async fn generate_key(
        &self,
        source_name: &str,
        key_length: i32,
    ) -> Result<String, KeyClientError> {
        self.service
            .generate_key(source_name, key_length)
            .await
            .map_err(Self::map_error)
    }

    async fn create_key(&self, source_name: &str, key: &str) -> Result<String, KeyClientError> {
        self.service
            .store_custom_key(source_name, key)
            .await
            .map(|_| key.to_string())
            .map_err(Self::map_error)
    }
}

/// Fully wired fake backend: real services, in-memory stores.
pub struct TestBackend {
    pub documents: Arc<MemoryDocumentStore>,
    pub sources: Arc<MemorySourceRepository>,
    pub keys: Arc<MemoryKeyRepository>,
    pub shorten: Arc<ShortenService>,
}

pub const TEST_INDEX: &str = "urls";
pub const TEST_SHORT_HOST: &str = "http://sho.rt";

pub fn create_backend() -> TestBackend {
    let documents = Arc::new(MemoryDocumentStore::new());
    let sources = Arc::new(MemorySourceRepository::new());
    let keys = Arc::new(MemoryKeyRepository::new());

    let keygen = KeygenService::new(sources.clone(), keys.clone());
    let shorten = Arc::new(ShortenService::new(
        TEST_INDEX,
        documents.clone(),
        Arc::new(LocalKeyClient::new(keygen)),
    ));

    TestBackend {
        documents,
        sources,
        keys,
        shorten,
    }
}

pub fn create_app_state(backend: &TestBackend) -> AppState {
    AppState {
        shorten: backend.shorten.clone(),
        short_host: TEST_SHORT_HOST.to_string(),
        min_slug_length: 4,
        max_slug_length: 32,
    }
}

pub fn create_keygen_state(backend: &TestBackend) -> KeygenState {
    KeygenState {
        keygen: Arc::new(KeygenService::new(
            backend.sources.clone(),
            backend.keys.clone(),
        )),
        min_key_length: 4,
        max_key_length: 64,
        min_source_name_length: 3,
    }
}
