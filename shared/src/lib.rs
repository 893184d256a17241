//! Shared utilities and common types for the Bug Tracker server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (environment-sourced, read once at startup)
//! - Error response structures and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, Environment, JwtConfig, LoggingConfig,
    RevocationConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
