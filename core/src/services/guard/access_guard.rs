//! Per-request authentication and role checks

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::entities::identity::RoleSet;
use crate::domain::entities::token::Claims;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::RevocationStore;
use crate::services::token::TokenCodec;

use super::policy::RevocationFailurePolicy;

const BEARER_PREFIX: &str = "bearer ";

/// Verifies bearer credentials against the codec and the revocation store
pub struct AccessGuard<S: RevocationStore> {
    codec: Arc<TokenCodec>,
    store: Arc<S>,
    failure_policy: RevocationFailurePolicy,
}

impl<S: RevocationStore> Clone for AccessGuard<S> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
            store: Arc::clone(&self.store),
            failure_policy: self.failure_policy,
        }
    }
}

impl<S: RevocationStore> AccessGuard<S> {
    /// Create a fail-closed access guard
    pub fn new(codec: Arc<TokenCodec>, store: Arc<S>) -> Self {
        Self {
            codec,
            store,
            failure_policy: RevocationFailurePolicy::default(),
        }
    }

    /// Set how an unreachable store is treated
    pub fn with_failure_policy(mut self, policy: RevocationFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn failure_policy(&self) -> RevocationFailurePolicy {
        self.failure_policy
    }

    /// Authenticates a raw `Authorization` header value
    ///
    /// Accepts `Bearer <token>` (scheme matched case-insensitively) or a bare
    /// token. Tokens of either kind are accepted.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Token verified, unexpired and not revoked
    /// * `Err(DomainError)` - `MissingCredential`, any decoding failure,
    ///   `TokenRevoked`, or a store error under the fail-closed policy
    pub async fn authenticate(&self, header: Option<&str>) -> DomainResult<Claims> {
        let token = extract_token(header)?;
        let claims = self.codec.decode(token)?;

        match self.store.is_revoked(&claims.jti).await {
            Ok(true) => {
                warn!(sub = %claims.sub, jti = %claims.jti, "Revoked token presented");
                Err(DomainError::Token(TokenError::TokenRevoked))
            }
            Ok(false) => {
                debug!(sub = %claims.sub, role = %claims.role, "Token authenticated");
                Ok(claims)
            }
            Err(e) => match self.failure_policy {
                RevocationFailurePolicy::FailClosed => {
                    error!(error = %e, jti = %claims.jti, "Revocation check failed");
                    Err(e)
                }
                RevocationFailurePolicy::FailOpen => {
                    warn!(
                        error = %e,
                        jti = %claims.jti,
                        "Revocation check failed, accepting token under fail-open policy"
                    );
                    Ok(claims)
                }
            },
        }
    }

    /// Checks the claims' role against `allowed`
    pub fn authorize(&self, claims: Claims, allowed: &RoleSet) -> DomainResult<Claims> {
        authorize(claims, allowed)
    }

    /// Authenticates the header and then authorizes the resulting claims
    pub async fn authenticate_with_roles(
        &self,
        header: Option<&str>,
        allowed: &RoleSet,
    ) -> DomainResult<Claims> {
        let claims = self.authenticate(header).await?;
        authorize(claims, allowed)
    }
}

/// Passes claims through when their role is in `allowed`
///
/// Pure check, no I/O.
pub fn authorize(claims: Claims, allowed: &RoleSet) -> DomainResult<Claims> {
    if allowed.contains(claims.role) {
        Ok(claims)
    } else {
        debug!(sub = %claims.sub, role = %claims.role, "Role not permitted");
        Err(DomainError::Auth(AuthError::Forbidden { role: claims.role }))
    }
}

fn extract_token(header: Option<&str>) -> DomainResult<&str> {
    let value = header.map(str::trim).unwrap_or_default();
    if value.eq_ignore_ascii_case(BEARER_PREFIX.trim_end()) {
        return Err(DomainError::Auth(AuthError::MissingCredential));
    }

    let token = match value.get(..BEARER_PREFIX.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER_PREFIX) => {
            value[BEARER_PREFIX.len()..].trim()
        }
        _ => value,
    };

    if token.is_empty() {
        return Err(DomainError::Auth(AuthError::MissingCredential));
    }
    Ok(token)
}
