//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds
    pub response_timeout: u64,

    /// Connection attempts made at startup before giving up
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Base delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Enable cache key prefix
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379/0"),
            connection_timeout: 5,
            response_timeout: 5,
            connect_retries: default_connect_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key/value source
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            url: lookup("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: lookup("REDIS_CONNECTION_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.connection_timeout),
            response_timeout: lookup("REDIS_RESPONSE_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.response_timeout),
            key_prefix: lookup("REDIS_KEY_PREFIX"),
            ..defaults
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set the number of connection attempts and the base delay between them
    pub fn with_connect_retries(mut self, retries: u32, delay_ms: u64) -> Self {
        self.connect_retries = retries.max(1);
        self.retry_delay_ms = delay_ms;
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_connect_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}
