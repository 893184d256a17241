//! Mapping of domain errors onto HTTP responses

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use bt_core::errors::{AuthError, DomainError, StoreError, TokenError};
use bt_shared::ErrorResponse;
use tracing::{error, warn};

/// API error wrapper for the ResponseError trait
#[derive(Debug)]
pub struct ApiError {
    pub error: DomainError,
}

impl ApiError {
    pub fn new(error: DomainError) -> Self {
        Self { error }
    }

    /// 400 with the given message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(DomainError::Validation {
            message: message.into(),
        })
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::new(error)
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        Self::new(error.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self::new(error.into())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(token_error) => match token_error {
            TokenError::Malformed
            | TokenError::InvalidSignature
            | TokenError::Expired
            | TokenError::InvalidTokenType { .. }
            | TokenError::TokenRevoked => StatusCode::UNAUTHORIZED,
            TokenError::KeyLoadError { .. }
            | TokenError::UnsupportedAlgorithm { .. }
            | TokenError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        },
        DomainError::Auth(AuthError::MissingCredential) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::Forbidden { .. }) => StatusCode::FORBIDDEN,
        DomainError::Store(StoreError::Unavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.error)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.error)
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        error!(code = error.error_code(), error = %error, "Request failed");
    } else {
        warn!(code = error.error_code(), status = status.as_u16(), "Request rejected");
    }

    let mut builder = HttpResponse::build(status);
    if status == StatusCode::UNAUTHORIZED {
        builder.insert_header(("WWW-Authenticate", "Bearer"));
    }
    builder.json(ErrorResponse::from(error))
}
