//! Response value objects for the issuance API.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;

/// Token type advertised to clients
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Issuance response returned by login, rotation and refresh
///
/// Serializes as `{access_token, refresh_token, token_type, expires_in}`,
/// where `expires_in` is the access token lifetime in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining a new pair
    pub refresh_token: String,

    /// Always `bearer`
    pub token_type: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,
}

impl From<TokenPair> for AuthResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: pair.access_expires_in,
        }
    }
}

/// Logout acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutResponse {
    pub message: String,
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self {
            message: "Logged out".to_string(),
        }
    }
}
