//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, StoreError, TokenError};

use bt_shared::error_codes;
use bt_shared::ErrorResponse;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::BAD_REQUEST,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(err) => err.error_code(),
            DomainError::Token(err) => err.error_code(),
            DomainError::Store(_) => error_codes::STORE_UNAVAILABLE,
        }
    }

    /// Whether the error means key material could not be used
    ///
    /// These are process-health failures rather than per-request ones.
    pub fn is_key_failure(&self) -> bool {
        matches!(
            self,
            DomainError::Token(TokenError::KeyLoadError { .. })
                | DomainError::Token(TokenError::UnsupportedAlgorithm { .. })
        )
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Auth(e) => e.into(),
            DomainError::Token(e) => e.into(),
            DomainError::Store(e) => e.into(),
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::BAD_REQUEST, message.clone())
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
