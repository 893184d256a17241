//! Token module for JWT management
//!
//! This module handles:
//! - Loading and caching the asymmetric signing keypair
//! - Encoding identities into signed tokens
//! - Decoding and verifying signed tokens back into claims

mod codec;
mod config;
mod key_provider;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::{TokenServiceConfig, MAX_TOKEN_LIFETIME_SECONDS};
pub use key_provider::KeyProvider;
