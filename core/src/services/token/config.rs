//! Configuration for the token codec

use std::str::FromStr;

use bt_shared::JwtConfig;
use jsonwebtoken::Algorithm;

use crate::domain::entities::token::{
    TokenKind, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
use crate::errors::{DomainError, DomainResult, TokenError};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Longest lifetime a configured token kind may have (ten years)
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 10 * 365 * SECONDS_PER_DAY;

/// Configuration for the token codec
///
/// Read once at startup; every encode and decode in the process uses the
/// same algorithm and lifetimes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// JWT signing algorithm (asymmetric only)
    pub algorithm: Algorithm,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::RS256,
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl TokenServiceConfig {
    /// Builds the codec configuration from the shared JWT settings
    ///
    /// # Returns
    ///
    /// * `Ok(TokenServiceConfig)` - Algorithm parsed and asymmetric, lifetimes valid
    /// * `Err(DomainError)` - Unknown or symmetric algorithm identifier, or a
    ///   lifetime rejected by [`validate`](Self::validate)
    pub fn from_jwt_config(jwt: &JwtConfig) -> DomainResult<Self> {
        let config = Self {
            algorithm: parse_algorithm(&jwt.algorithm)?,
            access_token_expiry_minutes: jwt.access_token_expire_minutes,
            refresh_token_expiry_days: jwt.refresh_token_expire_days,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that both lifetimes are positive and at most
    /// [`MAX_TOKEN_LIFETIME_SECONDS`]
    pub fn validate(&self) -> DomainResult<()> {
        lifetime_seconds("access token", self.access_token_expiry_minutes, SECONDS_PER_MINUTE)?;
        lifetime_seconds("refresh token", self.refresh_token_expiry_days, SECONDS_PER_DAY)?;
        Ok(())
    }

    /// Access token lifetime in seconds
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_token_expiry_minutes.saturating_mul(SECONDS_PER_MINUTE)
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_token_expiry_days.saturating_mul(SECONDS_PER_DAY)
    }

    /// Lifetime for the given token kind in seconds
    pub fn ttl_for(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_ttl_seconds(),
            TokenKind::Refresh => self.refresh_ttl_seconds(),
        }
    }
}

fn lifetime_seconds(name: &str, value: i64, unit: i64) -> DomainResult<i64> {
    let invalid = |reason: &str| DomainError::Validation {
        message: format!("{} lifetime {} {}", name, value, reason),
    };

    if value <= 0 {
        return Err(invalid("must be positive"));
    }
    match value.checked_mul(unit) {
        Some(seconds) if seconds <= MAX_TOKEN_LIFETIME_SECONDS => Ok(seconds),
        _ => Err(invalid("exceeds the maximum token lifetime")),
    }
}

/// Parses an algorithm identifier, accepting only asymmetric signatures
pub(crate) fn parse_algorithm(name: &str) -> DomainResult<Algorithm> {
    let unsupported = || {
        DomainError::Token(TokenError::UnsupportedAlgorithm {
            algorithm: name.to_string(),
        })
    };

    let algorithm = Algorithm::from_str(name.trim()).map_err(|_| unsupported())?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Err(unsupported()),
        _ => Ok(algorithm),
    }
}
