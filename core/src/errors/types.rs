//! Error types for token handling, authorization and revocation storage
//!
//! Each enum covers one failure family. Callers must be able to tell a bad
//! token from a revoked one and from an unreachable store, so the variants
//! are never collapsed into a generic failure.

use bt_shared::error_codes;
use bt_shared::ErrorResponse;
use thiserror::Error;

use crate::domain::entities::identity::Role;
use crate::domain::entities::token::TokenKind;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to load key material: {message}")]
    KeyLoadError { message: String },

    #[error("Unsupported signature algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Invalid token type: expected {expected}, found {found}")]
    InvalidTokenType { expected: TokenKind, found: TokenKind },

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Authorization errors raised by the access guard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing credential")]
    MissingCredential,

    #[error("Forbidden for role {role}")]
    Forbidden { role: Role },
}

/// Revocation store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Revocation store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}

impl TokenError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::KeyLoadError { .. } => error_codes::KEY_LOAD_ERROR,
            TokenError::UnsupportedAlgorithm { .. } => error_codes::UNSUPPORTED_ALGORITHM,
            TokenError::Malformed => error_codes::TOKEN_MALFORMED,
            TokenError::InvalidSignature => error_codes::TOKEN_INVALID_SIGNATURE,
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::InvalidTokenType { .. } => error_codes::TOKEN_INVALID_TYPE,
            TokenError::TokenRevoked => error_codes::TOKEN_REVOKED,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        }
    }
}

impl AuthError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => error_codes::MISSING_CREDENTIAL,
            AuthError::Forbidden { .. } => error_codes::FORBIDDEN,
        }
    }
}

/// Convert TokenError to ErrorResponse
///
/// Key loading details (paths, parser output) stay in the logs.
impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        match err {
            TokenError::KeyLoadError { .. } => {
                ErrorResponse::new(err.error_code(), "Signing keys unavailable")
            }
            _ => ErrorResponse::new(err.error_code(), err.to_string()),
        }
    }
}

/// Convert AuthError to ErrorResponse
impl From<&AuthError> for ErrorResponse {
    fn from(err: &AuthError) -> Self {
        let response = ErrorResponse::new(err.error_code(), err.to_string());
        match err {
            AuthError::Forbidden { role } => response.add_detail("role", role),
            AuthError::MissingCredential => response,
        }
    }
}

/// Convert StoreError to ErrorResponse
///
/// The store's own message is not forwarded to clients.
impl From<&StoreError> for ErrorResponse {
    fn from(_: &StoreError) -> Self {
        ErrorResponse::new(
            error_codes::STORE_UNAVAILABLE,
            "Revocation store unavailable",
        )
    }
}
