//! Session issuance module
//!
//! This module handles:
//! - Minting access and refresh token pairs for an identity
//! - One-time-use refresh token rotation
//! - Logout by revoking a refresh token

mod issuer;


pub use issuer::SessionIssuer;
