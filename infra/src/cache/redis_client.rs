//! Redis cache client implementation
//!
//! This module provides a Redis client with connect-time retry and bounded,
//! single-attempt operations. Callers on the request path must get an answer
//! (or an error) within the configured response timeout, so individual
//! commands are never retried here.

use std::future::Future;
use std::time::Duration;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// Upper bound for the exponential connect backoff
const MAX_RETRY_DELAY_MS: u64 = 5000;

/// Redis cache client over a multiplexed connection
///
/// Cloning is cheap; all clones share the same underlying connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// Connection attempts follow `config.connect_retries` and
    /// `config.retry_delay_ms` with exponential backoff.
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    ///
    /// # Example
    /// ```no_run
    /// use bt_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn create_client() -> Result<RedisClient, bt_infra::InfrastructureError> {
    ///     let config = CacheConfig::new("redis://localhost:6379/0");
    ///     RedisClient::new(config).await
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(
            url = %mask_url(&config.url),
            retries = config.connect_retries,
            "Creating Redis client"
        );

        // Parse Redis URL and create client
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(&client, &config).await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let max_attempts = config.connect_retries.max(1);
        let connect_timeout = Duration::from_secs(config.connection_timeout);
        let mut attempts = 0;
        let mut delay = config.retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Attempting to connect to Redis");

            let outcome = match timeout(connect_timeout, client.get_multiplexed_async_connection())
                .await
            {
                Ok(result) => result.map_err(InfrastructureError::Cache),
                Err(_) => Err(InfrastructureError::Timeout {
                    operation: "connect".to_string(),
                }),
            };

            match outcome {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_attempts && is_retriable(&e) => {
                    warn!(
                        attempt = attempts,
                        max_attempts,
                        delay_ms = delay,
                        error = %e,
                        "Failed to connect to Redis, retrying"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => {
                    error!(attempts, error = %e, "Failed to connect to Redis");
                    return Err(e);
                }
            }
        }
    }

    /// Configuration used to create this client
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Set a value with expiration time
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `value` - Value to store
    /// * `expiry_seconds` - Time to live in seconds
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!(key, expiry_seconds, "Setting key with expiry");

        let mut conn = self.connection.clone();
        self.bounded("SETEX", conn.set_ex::<_, _, ()>(key, value, expiry_seconds))
            .await
    }

    /// Set a value with expiration time unless the key already exists
    ///
    /// Issued as a single `SET key value NX EX ttl` so the check and the
    /// write are atomic on the server.
    ///
    /// # Returns
    /// * `Ok(true)` - The key was created by this call
    /// * `Ok(false)` - The key already existed and was left untouched
    pub async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<bool, InfrastructureError> {
        debug!(key, expiry_seconds, "Setting key if absent");

        let mut conn = self.connection.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("NX").arg("EX").arg(expiry_seconds);

        let reply: Option<String> = self
            .bounded("SET NX", cmd.query_async::<_, Option<String>>(&mut conn))
            .await?;
        Ok(reply.is_some())
    }

    /// Check if a key exists in cache
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!(key, "Checking if key exists");

        let mut conn = self.connection.clone();
        self.bounded("EXISTS", conn.exists::<_, bool>(key)).await
    }

    /// Get a value from cache
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!(key, "Getting key");

        let mut conn = self.connection.clone();
        self.bounded("GET", conn.get::<_, Option<String>>(key)).await
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if healthy, error otherwise
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let mut conn = self.connection.clone();
        let response: String = self
            .bounded(
                "PING",
                redis::cmd("PING").query_async::<_, String>(&mut conn),
            )
            .await?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!(response = %response, "Redis health check returned unexpected response");
            Ok(false)
        }
    }

    /// Runs one Redis command under the response timeout
    async fn bounded<T, F>(&self, operation: &str, future: F) -> Result<T, InfrastructureError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        let limit = Duration::from_secs(self.config.response_timeout);

        match timeout(limit, future).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!(operation, error = %e, "Redis command failed");
                Err(InfrastructureError::Cache(e))
            }
            Err(_) => {
                error!(operation, timeout_secs = limit.as_secs(), "Redis command timed out");
                Err(InfrastructureError::Timeout {
                    operation: operation.to_string(),
                })
            }
        }
    }
}

fn is_retriable(error: &InfrastructureError) -> bool {
    match error {
        InfrastructureError::Cache(e) => is_retriable_error(e),
        InfrastructureError::Timeout { .. } => true,
        InfrastructureError::Config(_) => false,
    }
}

/// Check if a Redis error is retriable
///
/// Determines if an error is transient and the connection attempt should be
/// repeated.
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask sensitive parts of Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
