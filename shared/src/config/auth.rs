//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// Token signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Path to the PEM-encoded private key used for signing
    pub private_key_path: String,

    /// Path to the PEM-encoded public key used for verification
    pub public_key_path: String,

    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_expire_days: i64,

    /// Signature algorithm identifier (default: RS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            private_key_path: String::from("keys/private.pem"),
            public_key_path: String::from("keys/public.pem"),
            access_token_expire_minutes: 15,
            refresh_token_expire_days: 7,
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a configuration pointing at the given key files
    pub fn new(private_key_path: impl Into<String>, public_key_path: impl Into<String>) -> Self {
        Self {
            private_key_path: private_key_path.into(),
            public_key_path: public_key_path.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key/value source
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            private_key_path: lookup("PRIVATE_KEY_PATH").unwrap_or(defaults.private_key_path),
            public_key_path: lookup("PUBLIC_KEY_PATH").unwrap_or(defaults.public_key_path),
            access_token_expire_minutes: lookup("ACCESS_TOKEN_EXPIRE_MINUTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expire_minutes),
            refresh_token_expire_days: lookup("REFRESH_TOKEN_EXPIRE_DAYS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expire_days),
            algorithm: lookup("ALGORITHM").unwrap_or(defaults.algorithm),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expire_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expire_days = days;
        self
    }

    /// Set the signature algorithm identifier
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.access_token_expire_minutes.saturating_mul(60)
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.refresh_token_expire_days.saturating_mul(24 * 3600)
    }
}

/// Revocation store policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Key prefix for revocation entries (`<prefix>:<jti>`)
    #[serde(default = "default_revocation_prefix")]
    pub key_prefix: String,

    /// Treat an unreachable store as "not revoked" during authentication
    #[serde(default)]
    pub fail_open: bool,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_revocation_prefix(),
            fail_open: false,
        }
    }
}

impl RevocationConfig {
    /// Create from an arbitrary key/value source
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            key_prefix: lookup("REVOCATION_KEY_PREFIX").unwrap_or_else(default_revocation_prefix),
            fail_open: lookup("REVOCATION_FAIL_OPEN")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Revocation policy
    #[serde(default)]
    pub revocation: RevocationConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let lookup = |key: &str| std::env::var(key).ok();
        Self {
            jwt: JwtConfig::from_source(lookup),
            revocation: RevocationConfig::from_source(lookup),
        }
    }
}

fn default_algorithm() -> String {
    String::from("RS256")
}

fn default_revocation_prefix() -> String {
    String::from("bl")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry_seconds(), 900);
        assert_eq!(config.refresh_token_expiry_seconds(), 604800);
        assert_eq!(config.algorithm, "RS256");
        assert_eq!(config.private_key_path, "keys/private.pem");
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("a.pem", "b.pem")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14)
            .with_algorithm("ES256");

        assert_eq!(config.access_token_expiry_seconds(), 1800);
        assert_eq!(config.refresh_token_expiry_seconds(), 1209600);
        assert_eq!(config.algorithm, "ES256");
    }

    #[test]
    fn test_jwt_config_from_source() {
        let config = JwtConfig::from_source(source(&[
            ("PRIVATE_KEY_PATH", "/secrets/priv.pem"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "5"),
            ("REFRESH_TOKEN_EXPIRE_DAYS", "not-a-number"),
        ]));

        assert_eq!(config.private_key_path, "/secrets/priv.pem");
        assert_eq!(config.public_key_path, "keys/public.pem");
        assert_eq!(config.access_token_expiry_seconds(), 300);
        assert_eq!(config.refresh_token_expire_days, 7);
    }

    #[test]
    fn test_revocation_config_from_source() {
        let config = RevocationConfig::from_source(source(&[("REVOCATION_FAIL_OPEN", "true")]));
        assert!(config.fail_open);
        assert_eq!(config.key_prefix, "bl");

        let config = RevocationConfig::from_source(source(&[]));
        assert!(!config.fail_open);
    }
}
