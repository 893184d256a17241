use bt_core::domain::entities::identity::Role;
use bt_core::domain::entities::token::{Claims, TokenKind};
use serde::{Deserialize, Serialize};

/// Body of the refresh and logout endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl RefreshTokenRequest {
    /// The supplied token, if present and not blank
    pub fn token(&self) -> Option<&str> {
        self.refresh_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// Claims of the calling token as returned by `/api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub sub: String,
    pub username: String,
    pub role: Role,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for MeResponse {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            username: claims.username,
            role: claims.role,
            kind: claims.kind,
            jti: claims.jti,
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}
