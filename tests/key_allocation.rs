//! Key allocation flows against in-memory repositories.

mod common;

use std::sync::Arc;

use base64::Engine as _;
use shortkey::application::services::{KeygenError, KeygenService};

fn allocator(backend: &common::TestBackend) -> KeygenService {
    KeygenService::new(backend.sources.clone(), backend.keys.clone())
}

#[tokio::test]
async fn test_generated_key_meets_length_and_encoding() {
    let backend = common::create_backend();
    let service = allocator(&backend);

    for length in [1, 4, 8, 32] {
        let key = service.generate_key("http://sho.rt", length).await.unwrap();
        assert!(key.len() >= length as usize);
        assert!(
            base64::engine::general_purpose::URL_SAFE_NO_PAD
                .decode(&key)
                .is_ok()
        );
    }
}

#[tokio::test]
async fn test_sequential_allocations_resolve_to_one_source() {
    let backend = common::create_backend();
    let service = allocator(&backend);

    service.generate_key("http://sho.rt", 8).await.unwrap();
    service.generate_key("http://sho.rt", 8).await.unwrap();

    // Second call exercised the already-exists fallback, not a fresh insert.
    assert_eq!(backend.sources.count(), 1);
    assert_eq!(backend.keys.count(), 2);
}

#[tokio::test]
async fn test_distinct_names_create_distinct_sources() {
    let backend = common::create_backend();
    let service = allocator(&backend);

    service.generate_key("http://a.example", 8).await.unwrap();
    service.generate_key("http://b.example", 8).await.unwrap();

    assert_eq!(backend.sources.count(), 2);
}

#[tokio::test]
async fn test_register_empty_key_always_fails() {
    let backend = common::create_backend();
    let service = allocator(&backend);

    let result = service.store_custom_key("http://sho.rt", "").await;
    assert!(matches!(result, Err(KeygenError::CustomKeyEmpty)));

    // Independent of store state.
    assert_eq!(backend.sources.count(), 0);
    assert_eq!(backend.keys.count(), 0);
}

#[tokio::test]
async fn test_register_same_key_twice_conflicts() {
    let backend = common::create_backend();
    let service = allocator(&backend);

    service
        .store_custom_key("http://sho.rt", "taken123")
        .await
        .unwrap();

    let result = service.store_custom_key("http://sho.rt", "taken123").await;
    assert!(matches!(result, Err(KeygenError::KeyAlreadyExists)));
}

#[tokio::test]
async fn test_key_uniqueness_spans_sources() {
    let backend = common::create_backend();
    let service = allocator(&backend);

    service
        .store_custom_key("http://a.example", "taken123")
        .await
        .unwrap();

    // Same key under a different source still conflicts.
    let result = service.store_custom_key("http://b.example", "taken123").await;
    assert!(matches!(result, Err(KeygenError::KeyAlreadyExists)));
}

#[tokio::test]
async fn test_zero_length_allocation_is_rejected_before_io() {
    let backend = common::create_backend();
    let service = allocator(&backend);

    let result = service.generate_key("http://sho.rt", 0).await;
    assert!(matches!(result, Err(KeygenError::KeyLengthInvalid)));
    assert_eq!(backend.sources.count(), 0);
}

#[tokio::test]
async fn test_deactivated_source_fails_resolution() {
    let backend = common::create_backend();
    let service = allocator(&backend);

    service.generate_key("http://sho.rt", 8).await.unwrap();
    backend.sources.deactivate("http://sho.rt");

    let result = service.generate_key("http://sho.rt", 8).await;
    assert!(matches!(result, Err(KeygenError::SourceResolutionFailed(_))));
}

#[tokio::test]
async fn test_allocator_shares_ledger_with_custom_keys() {
    let backend = common::create_backend();
    let service = Arc::new(allocator(&backend));

    let generated = service.generate_key("http://sho.rt", 8).await.unwrap();

    // A custom key equal to an already-generated one conflicts.
    let result = service.store_custom_key("http://sho.rt", &generated).await;
    assert!(matches!(result, Err(KeygenError::KeyAlreadyExists)));
}
