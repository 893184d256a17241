//! Redis-backed revocation store
//!
//! Entries live at `[<cache prefix>:]<prefix>:<jti>` with the sentinel value
//! `"1"` and expire through Redis TTLs. Every API instance pointed at the same Redis shares the
//! same revocations.

use async_trait::async_trait;
use tracing::debug;

use bt_core::errors::DomainError;
use bt_core::repositories::revocation::MIN_REVOCATION_TTL_SECONDS;
use bt_core::repositories::RevocationStore;
use bt_shared::config::RevocationConfig;

use super::redis_client::RedisClient;
use super::CacheConfig;

/// Value stored for every revoked identifier
const REVOKED_SENTINEL: &str = "1";

/// Revocation store over a shared Redis instance
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
    key_prefix: String,
}

impl RedisRevocationStore {
    /// Create a store with the default `bl` key prefix
    pub fn new(client: RedisClient) -> Self {
        Self::with_config(client, &RevocationConfig::default())
    }

    /// Create a store using the configured key prefix
    ///
    /// A `REDIS_KEY_PREFIX` on the client's cache config namespaces the
    /// revocation prefix.
    pub fn with_config(client: RedisClient, config: &RevocationConfig) -> Self {
        let key_prefix = store_prefix(client.config(), &config.key_prefix);
        Self { client, key_prefix }
    }

    /// Key under which `jti` is recorded
    pub fn key_for(&self, jti: &str) -> String {
        revocation_key(&self.key_prefix, jti)
    }

    /// Underlying Redis client
    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

pub(crate) fn store_prefix(cache: &CacheConfig, revocation_prefix: &str) -> String {
    if revocation_prefix.is_empty() {
        cache.key_prefix.clone().unwrap_or_default()
    } else {
        cache.make_key(revocation_prefix)
    }
}

pub(crate) fn revocation_key(prefix: &str, jti: &str) -> String {
    if prefix.is_empty() {
        jti.to_string()
    } else {
        format!("{}:{}", prefix, jti)
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        let ttl = ttl_seconds.max(MIN_REVOCATION_TTL_SECONDS);
        self.client
            .set_with_expiry(&self.key_for(jti), REVOKED_SENTINEL, ttl)
            .await?;

        debug!(jti, ttl, "Revocation entry written");
        Ok(())
    }

    async fn revoke_if_absent(&self, jti: &str, ttl_seconds: u64) -> Result<bool, DomainError> {
        let ttl = ttl_seconds.max(MIN_REVOCATION_TTL_SECONDS);
        let created = self
            .client
            .set_if_absent_with_expiry(&self.key_for(jti), REVOKED_SENTINEL, ttl)
            .await?;

        debug!(jti, ttl, created, "Conditional revocation");
        Ok(created)
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key_for(jti)).await?)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(self.client.health_check().await?)
    }
}
