//! Shared fixtures for the api integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bt_api::AppState;
use bt_core::{
    DomainError, Identity, InMemoryRevocationStore, KeyProvider, RevocationFailurePolicy,
    RevocationStore, Role, StoreError, TokenCodec, TokenServiceConfig,
};
use jsonwebtoken::Algorithm;

pub const PRIVATE_KEY_PEM: &str = include_str!("../../../core/tests/fixtures/jwt_private_key.pem");
pub const PUBLIC_KEY_PEM: &str = include_str!("../../../core/tests/fixtures/jwt_public_key.pem");
pub const OTHER_PRIVATE_KEY_PEM: &str =
    include_str!("../../../core/tests/fixtures/other_private_key.pem");
pub const OTHER_PUBLIC_KEY_PEM: &str =
    include_str!("../../../core/tests/fixtures/other_public_key.pem");

pub fn codec_with(
    private_pem: &str,
    public_pem: &str,
    config: TokenServiceConfig,
) -> Arc<TokenCodec> {
    let keys = KeyProvider::from_pem_strings(Algorithm::RS256, private_pem, public_pem).unwrap();
    Arc::new(TokenCodec::new(Arc::new(keys), config))
}

pub fn codec() -> Arc<TokenCodec> {
    codec_with(PRIVATE_KEY_PEM, PUBLIC_KEY_PEM, TokenServiceConfig::default())
}

/// Codec signing with a keypair the server does not trust
pub fn foreign_codec() -> Arc<TokenCodec> {
    codec_with(
        OTHER_PRIVATE_KEY_PEM,
        OTHER_PUBLIC_KEY_PEM,
        TokenServiceConfig::default(),
    )
}

pub fn alice() -> Identity {
    Identity::new("u1", "alice", Role::Manager)
}

pub fn bob() -> Identity {
    Identity::new("u2", "bob", Role::Developer)
}

pub fn memory_state(codec: Arc<TokenCodec>) -> AppState<InMemoryRevocationStore> {
    AppState::new(
        codec,
        Arc::new(InMemoryRevocationStore::new()),
        RevocationFailurePolicy::FailClosed,
    )
}

/// Store whose backend is always unreachable
#[derive(Debug, Default)]
pub struct UnreachableStore;

#[async_trait]
impl RevocationStore for UnreachableStore {
    async fn revoke(&self, _jti: &str, _ttl_seconds: u64) -> Result<(), DomainError> {
        Err(StoreError::unavailable("connection refused").into())
    }

    async fn revoke_if_absent(&self, _jti: &str, _ttl_seconds: u64) -> Result<bool, DomainError> {
        Err(StoreError::unavailable("connection refused").into())
    }

    async fn is_revoked(&self, _jti: &str) -> Result<bool, DomainError> {
        Err(StoreError::unavailable("connection refused").into())
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Err(StoreError::unavailable("connection refused").into())
    }
}

pub fn unreachable_state(
    codec: Arc<TokenCodec>,
    policy: RevocationFailurePolicy,
) -> AppState<UnreachableStore> {
    AppState::new(codec, Arc::new(UnreachableStore), policy)
}
