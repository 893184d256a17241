//! Unit tests for the in-memory revocation store

use std::time::Duration;

use crate::repositories::revocation::{InMemoryRevocationStore, RevocationStore};

#[tokio::test]
async fn test_revoke_then_is_revoked() {
    let store = InMemoryRevocationStore::new();

    assert!(!store.is_revoked("jti-1").await.unwrap());
    store.revoke("jti-1", 60).await.unwrap();
    assert!(store.is_revoked("jti-1").await.unwrap());
    assert!(!store.is_revoked("jti-2").await.unwrap());
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let store = InMemoryRevocationStore::new();

    store.revoke("jti-1", 60).await.unwrap();
    store.revoke("jti-1", 60).await.unwrap();

    assert!(store.is_revoked("jti-1").await.unwrap());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_revoke_if_absent_only_succeeds_once() {
    let store = InMemoryRevocationStore::new();

    assert!(store.revoke_if_absent("jti-1", 60).await.unwrap());
    assert!(!store.revoke_if_absent("jti-1", 60).await.unwrap());
    assert!(store.is_revoked("jti-1").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire_after_ttl() {
    let store = InMemoryRevocationStore::new();
    store.revoke("jti-1", 10).await.unwrap();

    tokio::time::advance(Duration::from_secs(9)).await;
    assert!(store.is_revoked("jti-1").await.unwrap());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(!store.is_revoked("jti-1").await.unwrap());
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_expired_entry_can_be_claimed_again() {
    let store = InMemoryRevocationStore::new();
    assert!(store.revoke_if_absent("jti-1", 5).await.unwrap());

    tokio::time::advance(Duration::from_secs(6)).await;
    assert!(store.revoke_if_absent("jti-1", 5).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_zero_ttl_is_clamped_to_one_second() {
    let store = InMemoryRevocationStore::new();
    store.revoke("jti-1", 0).await.unwrap();
    assert!(store.is_revoked("jti-1").await.unwrap());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(!store.is_revoked("jti-1").await.unwrap());
}

#[tokio::test]
async fn test_clones_share_entries() {
    let store = InMemoryRevocationStore::new();
    let other = store.clone();

    store.revoke("jti-1", 60).await.unwrap();
    assert!(other.is_revoked("jti-1").await.unwrap());
}

#[tokio::test]
async fn test_health_check_is_always_up() {
    let store = InMemoryRevocationStore::new();
    assert!(store.health_check().await.unwrap());
}
