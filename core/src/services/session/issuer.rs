//! Main session issuer implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::revocation::revocation_ttl;
use crate::repositories::RevocationStore;
use crate::services::token::TokenCodec;

/// Issues, rotates and revokes token pairs
pub struct SessionIssuer<S: RevocationStore> {
    /// Codec used to sign and verify tokens
    codec: Arc<TokenCodec>,
    /// Shared store of revoked token identifiers
    store: Arc<S>,
}

impl<S: RevocationStore> Clone for SessionIssuer<S> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RevocationStore> SessionIssuer<S> {
    /// Create a new session issuer
    ///
    /// # Arguments
    ///
    /// * `codec` - Token codec
    /// * `store` - Revocation store shared with the access guard
    pub fn new(codec: Arc<TokenCodec>, store: Arc<S>) -> Self {
        Self { codec, store }
    }

    /// Mints a fresh access and refresh token for `identity`
    ///
    /// The two tokens share only the identity fields; kind, `jti` and expiry
    /// differ.
    pub fn issue_pair(&self, identity: &Identity) -> DomainResult<TokenPair> {
        let access = self.codec.issue(identity, TokenKind::Access)?;
        let refresh = self.codec.issue(identity, TokenKind::Refresh)?;

        info!(
            sub = %identity.subject_id,
            role = %identity.role,
            access_jti = %access.jti,
            refresh_jti = %refresh.jti,
            "Issued token pair"
        );

        Ok(TokenPair::new(access, refresh))
    }

    /// Exchanges a refresh token for a new pair, revoking the old one
    ///
    /// A refresh token can be rotated successfully exactly once. Concurrent
    /// rotations of the same token race on an atomic claim of its `jti` in
    /// the store, and only the winner receives a pair. The replacement pair is
    /// signed before the claim, so a signing failure leaves the old token
    /// usable; a pair minted by a losing rotation is dropped.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New pair minted from the identity in the old token
    /// * `Err(DomainError)` - Decoding failure, `InvalidTokenType` if the
    ///   token is not a refresh token, `TokenRevoked` on reuse, a key error
    ///   from signing, or a store error (never treated as "not revoked")
    pub async fn rotate(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self.decode_refresh(refresh_token)?;

        if self.store.is_revoked(&claims.jti).await? {
            warn!(sub = %claims.sub, jti = %claims.jti, "Revoked refresh token presented");
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        let pair = self.issue_pair(&claims.identity())?;

        let ttl = revocation_ttl(self.codec.config().refresh_ttl_seconds());
        if !self.store.revoke_if_absent(&claims.jti, ttl).await? {
            warn!(
                sub = %claims.sub,
                jti = %claims.jti,
                "Refresh token rotated concurrently, discarding minted pair"
            );
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        info!(sub = %claims.sub, old_jti = %claims.jti, "Rotated refresh token");
        Ok(pair)
    }

    /// Revokes the supplied token (logout)
    ///
    /// Sibling access tokens are not revoked and stay valid until they expire.
    /// Revoking an already revoked token succeeds.
    pub async fn revoke_session(&self, token: &str) -> DomainResult<()> {
        let claims = self.codec.decode(token)?;
        let ttl = revocation_ttl(self.codec.config().refresh_ttl_seconds());

        self.store.revoke(&claims.jti, ttl).await?;
        info!(sub = %claims.sub, jti = %claims.jti, kind = %claims.kind, "Session revoked");
        Ok(())
    }

    fn decode_refresh(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.codec.decode(token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(DomainError::Token(TokenError::InvalidTokenType {
                expected: TokenKind::Refresh,
                found: claims.kind,
            }));
        }
        Ok(claims)
    }
}
