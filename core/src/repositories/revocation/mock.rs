//! Mock implementation of RevocationStore for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Barrier;

use crate::errors::{DomainError, StoreError};

use super::memory::InMemoryRevocationStore;
use super::r#trait::RevocationStore;

/// Revocation store with switchable availability and call counters
///
/// An optional barrier holds every `is_revoked` call after it has read the
/// store, which lets tests line up concurrent check-then-write sequences.
#[derive(Clone, Default)]
pub struct MockRevocationStore {
    inner: InMemoryRevocationStore,
    unavailable: Arc<AtomicBool>,
    revoke_calls: Arc<AtomicUsize>,
    is_revoked_calls: Arc<AtomicUsize>,
    read_barrier: Option<Arc<Barrier>>,
}

impl MockRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `is_revoked` wait until `parties` callers have read the store
    pub fn with_read_barrier(mut self, parties: usize) -> Self {
        self.read_barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    /// Simulate an outage (or recovery) of the backend
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn revoke_calls(&self) -> usize {
        self.revoke_calls.load(Ordering::SeqCst)
    }

    pub fn is_revoked_calls(&self) -> usize {
        self.is_revoked_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("mock store offline").into());
        }
        Ok(())
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.check_available()?;
        self.revoke_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.revoke(jti, ttl_seconds).await
    }

    async fn revoke_if_absent(&self, jti: &str, ttl_seconds: u64) -> Result<bool, DomainError> {
        self.check_available()?;
        self.revoke_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.revoke_if_absent(jti, ttl_seconds).await
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        self.is_revoked_calls.fetch_add(1, Ordering::SeqCst);
        let revoked = self.inner.is_revoked(jti).await?;

        if let Some(barrier) = &self.read_barrier {
            barrier.wait().await;
        }
        Ok(revoked)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(true)
    }
}
