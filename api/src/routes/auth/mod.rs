//! Authentication route handlers
//!
//! This module contains the token endpoints:
//! - Token refresh (one-time-use rotation)
//! - Logout (refresh token revocation)
//! - Current caller claims

pub mod logout;
pub mod me;
pub mod refresh;

pub use logout::logout;
pub use me::me;
pub use refresh::refresh_token;

/// Message returned when the body lacks a refresh token
pub const REFRESH_TOKEN_REQUIRED: &str = "refresh_token required";
