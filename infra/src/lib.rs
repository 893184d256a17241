//! # Infrastructure Layer
//!
//! Concrete implementations of the core's storage seams for the Bug Tracker
//! backend.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client with bounded operations and the Redis-backed
//!   revocation store shared by every API instance

use bt_core::errors::{DomainError, StoreError};

/// Cache module - Redis client and the revocation store built on it
pub mod cache;

pub use cache::{RedisClient, RedisRevocationStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A Redis call did not answer within the response timeout
    #[error("Timed out during {operation}")]
    Timeout { operation: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Any infrastructure failure surfaces to the core as an unavailable store
impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Store(StoreError::unavailable(err.to_string()))
    }
}
