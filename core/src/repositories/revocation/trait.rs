//! Revocation store trait defining the contract with the shared revocation backend.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Shortest lifetime a revocation entry may be written with
pub const MIN_REVOCATION_TTL_SECONDS: u64 = 1;

/// Converts a token lifetime into a store TTL
///
/// Non-positive lifetimes are clamped to [`MIN_REVOCATION_TTL_SECONDS`]
/// because TTL-capable backends reject a zero expiry.
pub fn revocation_ttl(seconds: i64) -> u64 {
    u64::try_from(seconds)
        .unwrap_or(0)
        .max(MIN_REVOCATION_TTL_SECONDS)
}

/// Store of revoked token identifiers (`jti`)
///
/// Implementations are shared by every process running authorization checks,
/// so a revocation written by one instance must be visible to all of them.
/// Entries expire on their own after the TTL and are never deleted otherwise.
///
/// # Failure semantics
/// - An unreachable backend is reported as `DomainError::Store(StoreError::Unavailable)`.
///   It must never be reported as "not revoked".
/// - No method retries internally.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Mark a token identifier as revoked for `ttl_seconds`
    ///
    /// Idempotent: revoking an already-revoked identifier succeeds.
    ///
    /// # Arguments
    /// * `jti` - The token identifier
    /// * `ttl_seconds` - Lifetime of the revocation entry
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Atomically mark a token identifier as revoked unless it already is
    ///
    /// # Returns
    /// * `Ok(true)` - This call created the entry
    /// * `Ok(false)` - The identifier was already revoked
    /// * `Err(DomainError)` - The store could not be reached
    async fn revoke_if_absent(&self, jti: &str, ttl_seconds: u64) -> Result<bool, DomainError>;

    /// Check whether a token identifier is currently revoked
    ///
    /// # Returns
    /// * `Ok(true)` - A live revocation entry exists
    /// * `Ok(false)` - No entry, or the entry has expired
    /// * `Err(DomainError)` - The store could not be reached
    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError>;

    /// Check that the backend answers
    ///
    /// In-process stores are always reachable.
    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}
