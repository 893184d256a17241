//! Shared fixtures for service tests

use std::sync::Arc;

use jsonwebtoken::Algorithm;

use crate::domain::entities::identity::{Identity, Role};
use crate::services::token::{KeyProvider, TokenCodec, TokenServiceConfig};

pub const PRIVATE_KEY_PEM: &str = include_str!("../../tests/fixtures/jwt_private_key.pem");
pub const PUBLIC_KEY_PEM: &str = include_str!("../../tests/fixtures/jwt_public_key.pem");
pub const OTHER_PRIVATE_KEY_PEM: &str = include_str!("../../tests/fixtures/other_private_key.pem");
pub const OTHER_PUBLIC_KEY_PEM: &str = include_str!("../../tests/fixtures/other_public_key.pem");
pub const EC_PRIVATE_KEY_PEM: &str = include_str!("../../tests/fixtures/ec_private_key.pem");
pub const EC_PUBLIC_KEY_PEM: &str = include_str!("../../tests/fixtures/ec_public_key.pem");

pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

pub fn rsa_keys() -> Arc<KeyProvider> {
    Arc::new(
        KeyProvider::from_pem_strings(Algorithm::RS256, PRIVATE_KEY_PEM, PUBLIC_KEY_PEM)
            .expect("fixture keys should parse"),
    )
}

pub fn codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(rsa_keys(), TokenServiceConfig::default()))
}

pub fn alice() -> Identity {
    Identity::new("u1", "alice", Role::Manager)
}
