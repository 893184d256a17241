//! In-process revocation store
//!
//! Suitable for single-instance deployments and tests. Entries are visible
//! only to the process that holds the store, so a horizontally scaled fleet
//! needs a shared backend instead.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::DomainError;

use super::r#trait::{RevocationStore, MIN_REVOCATION_TTL_SECONDS};

/// TTL-aware in-memory map of revoked token identifiers
#[derive(Clone, Default)]
pub struct InMemoryRevocationStore {
    entries: Arc<RwLock<HashMap<String, Instant>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|expires_at| **expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn expiry(ttl_seconds: u64) -> Instant {
        Instant::now() + Duration::from_secs(ttl_seconds.max(MIN_REVOCATION_TTL_SECONDS))
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, expires_at| *expires_at > now);
        entries.insert(jti.to_string(), Self::expiry(ttl_seconds));
        Ok(())
    }

    async fn revoke_if_absent(&self, jti: &str, ttl_seconds: u64) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, expires_at| *expires_at > now);

        if entries.contains_key(jti) {
            return Ok(false);
        }
        entries.insert(jti.to_string(), Self::expiry(ttl_seconds));
        Ok(true)
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(jti)
            .map(|expires_at| *expires_at > Instant::now())
            .unwrap_or(false))
    }
}
