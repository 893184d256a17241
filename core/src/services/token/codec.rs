//! Signing and verification of self-describing JWTs

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Header, Validation};
use tracing::{debug, error, warn};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{Claims, IssuedToken, TokenKind};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;
use super::key_provider::KeyProvider;

/// Stateless JWT codec
///
/// Encoding signs claims with the private key; decoding verifies the
/// signature and expiry against the public key. The codec never consults
/// the revocation store.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    keys: Arc<KeyProvider>,
    config: TokenServiceConfig,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec over the given keys
    ///
    /// # Arguments
    ///
    /// * `keys` - Shared key provider; its algorithm is used for signing
    ///   and verification
    /// * `config` - Token lifetimes. An `algorithm` that differs from the
    ///   keys' is replaced by theirs.
    pub fn new(keys: Arc<KeyProvider>, mut config: TokenServiceConfig) -> Self {
        let algorithm = keys.algorithm();
        if config.algorithm != algorithm {
            warn!(
                configured = ?config.algorithm,
                keys = ?algorithm,
                "Codec algorithm differs from key algorithm, using the keys'"
            );
            config.algorithm = algorithm;
        }

        let mut validation = Validation::new(algorithm);
        // Expiry is checked by hand so the boundary is exact: now >= exp is expired.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            keys,
            config,
            validation,
        }
    }

    /// Codec configuration
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Key provider backing this codec
    pub fn keys(&self) -> &Arc<KeyProvider> {
        &self.keys
    }

    /// Signs a token of the given kind with the configured lifetime
    pub fn issue(&self, identity: &Identity, kind: TokenKind) -> DomainResult<IssuedToken> {
        self.encode(identity, kind, self.config.ttl_for(kind))
    }

    /// Signs a token for `identity`
    ///
    /// # Arguments
    ///
    /// * `identity` - Subject, username and role to embed
    /// * `kind` - Access or refresh
    /// * `ttl_seconds` - Lifetime; zero yields a token that is already expired
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - Compact token with its fresh `jti`
    /// * `Err(DomainError)` - Key unavailable or signing failed
    pub fn encode(
        &self,
        identity: &Identity,
        kind: TokenKind,
        ttl_seconds: i64,
    ) -> DomainResult<IssuedToken> {
        let claims = Claims::new(identity, kind, ttl_seconds);
        let token = self.encode_claims(&claims)?;

        Ok(IssuedToken {
            token,
            jti: claims.jti,
            expires_in: ttl_seconds,
        })
    }

    /// Signs prepared claims
    pub fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        let key = self.keys.signing_key()?;
        let header = Header::new(self.config.algorithm);

        encode(&header, claims, key).map_err(|e| {
            error!(error = %e, "Failed to sign token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verifies a token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid and token not expired
    /// * `Err(DomainError)` - `Malformed`, `InvalidSignature` or `Expired`,
    ///   or a key loading failure
    pub fn decode(&self, token: &str) -> DomainResult<Claims> {
        let key = self.keys.verification_key()?;

        let data = decode::<Claims>(token, key, &self.validation).map_err(|e| {
            let mapped = match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed,
            };
            debug!(reason = ?e.kind(), "Token rejected");
            DomainError::Token(mapped)
        })?;

        let claims = data.claims;
        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(DomainError::Token(TokenError::Expired));
        }

        Ok(claims)
    }
}
