//! Token entities for JWT-based authentication.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::identity::{Identity, Role};

/// Default access token lifetime (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Default refresh token lifetime (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Kind of a signed token, carried in the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token authorizing individual requests
    Access,
    /// Longer-lived token exchanged for a new pair exactly once
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Username at issuance time
    pub username: String,

    /// Role at issuance time
    pub role: Role,

    /// Token kind
    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID, the revocation handle
    pub jti: String,
}

impl Claims {
    /// Creates claims for the given identity with a fresh random `jti`
    ///
    /// # Arguments
    ///
    /// * `identity` - The identity the token is issued to
    /// * `kind` - Access or refresh
    /// * `ttl_seconds` - Lifetime; `exp = iat + ttl_seconds`
    pub fn new(identity: &Identity, kind: TokenKind, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: identity.subject_id.clone(),
            username: identity.username.clone(),
            role: identity.role,
            kind,
            iat: now,
            exp: now.saturating_add(ttl_seconds),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Identity subset of the claims
    pub fn identity(&self) -> Identity {
        Identity::new(self.sub.clone(), self.username.clone(), self.role)
    }

    /// Checks if the claims have expired at `now` (unix seconds)
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Seconds until expiry, zero once expired
    pub fn remaining_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

/// A freshly signed token together with its handle and lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS string
    pub token: String,

    /// JWT ID embedded in the token
    pub jti: String,

    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Access and refresh tokens minted by one issuance call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(access: IssuedToken, refresh: IssuedToken) -> Self {
        Self {
            access_token: access.token,
            refresh_token: refresh.token,
            access_expires_in: access.expires_in,
            refresh_expires_in: refresh.expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity::new("u1", "alice", Role::Manager)
    }

    #[test]
    fn test_claims_from_identity() {
        let claims = Claims::new(&alice(), TokenKind::Access, 900);

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 900);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
        assert_eq!(claims.identity(), alice());
    }

    #[test]
    fn test_claims_wire_names() {
        let claims = Claims::new(&alice(), TokenKind::Refresh, 60);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["type"], "refresh");
        assert_eq!(json["role"], "manager");
        for field in ["sub", "username", "iat", "exp", "jti"] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn test_claims_expiration_boundary() {
        let claims = Claims::new(&alice(), TokenKind::Access, 10);

        assert!(!claims.is_expired_at(claims.exp - 1));
        assert!(claims.is_expired_at(claims.exp));
        assert!(claims.is_expired_at(claims.exp + 1));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let claims = Claims::new(&alice(), TokenKind::Access, 0);
        assert!(claims.is_expired());
        assert_eq!(claims.remaining_seconds(), 0);
    }

    #[test]
    fn test_each_claims_gets_a_distinct_jti() {
        let a = Claims::new(&alice(), TokenKind::Access, 60);
        let b = Claims::new(&alice(), TokenKind::Access, 60);
        assert_ne!(a.jti, b.jti);
    }
}
