//! # Bug Tracker Core
//!
//! Token lifecycle and authorization layer for the Bug Tracker backend.
//! This crate contains the domain entities, the signing key provider, the token
//! codec, the revocation store interface, and the two services built on top of
//! them: session issuance/rotation and request-time access checks.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
