//! Cache module for Redis-based storage
//!
//! This module provides the Redis client used by the API and the revocation
//! store that keeps burned refresh tokens under `<prefix>:<jti>`.

pub mod redis_client;
pub mod revocation_store;


pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use bt_shared::config::cache::CacheConfig;
