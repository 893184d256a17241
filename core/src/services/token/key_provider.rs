//! Asymmetric key management for JWT signing and verification

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bt_shared::JwtConfig;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::parse_algorithm;

/// Where the key material comes from
#[derive(Debug, Clone)]
enum KeySource {
    Files {
        private_key_path: PathBuf,
        public_key_path: PathBuf,
    },
    Memory,
}

/// Load-once provider of the signing keypair
///
/// Each key is read and parsed on first use and cached for the lifetime of
/// the provider. Concurrent first calls block on the same initialisation, so
/// readers only ever observe a fully parsed key. The provider never
/// regenerates or reloads keys.
pub struct KeyProvider {
    algorithm: Algorithm,
    source: KeySource,
    encoding_key: OnceCell<EncodingKey>,
    decoding_key: OnceCell<DecodingKey>,
}

impl fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyProvider")
            .field("algorithm", &self.algorithm)
            .field("source", &self.source)
            .field("signing_key_loaded", &self.encoding_key.get().is_some())
            .field("verification_key_loaded", &self.decoding_key.get().is_some())
            .finish()
    }
}

impl KeyProvider {
    /// Creates a lazy key provider reading PEM files
    ///
    /// No file is touched until the first [`signing_key`](Self::signing_key)
    /// or [`verification_key`](Self::verification_key) call.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - Asymmetric algorithm the keys are used with
    /// * `private_key_path` - Path to the PEM-encoded private key file
    /// * `public_key_path` - Path to the PEM-encoded public key file
    pub fn new<P: AsRef<Path>>(algorithm: Algorithm, private_key_path: P, public_key_path: P) -> Self {
        Self {
            algorithm,
            source: KeySource::Files {
                private_key_path: private_key_path.as_ref().to_path_buf(),
                public_key_path: public_key_path.as_ref().to_path_buf(),
            },
            encoding_key: OnceCell::new(),
            decoding_key: OnceCell::new(),
        }
    }

    /// Creates a lazy key provider from the shared JWT configuration
    ///
    /// # Returns
    ///
    /// * `Ok(KeyProvider)` - Provider created; keys not yet loaded
    /// * `Err(DomainError)` - The configured algorithm is not asymmetric
    pub fn from_config(config: &JwtConfig) -> DomainResult<Self> {
        let algorithm = parse_algorithm(&config.algorithm)?;
        Ok(Self::new(
            algorithm,
            &config.private_key_path,
            &config.public_key_path,
        ))
    }

    /// Creates a key provider from PEM strings (useful for testing or embedded keys)
    ///
    /// Both keys are parsed immediately.
    pub fn from_pem_strings(
        algorithm: Algorithm,
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> DomainResult<Self> {
        let encoding_key = parse_encoding_key(algorithm, private_key_pem.as_bytes())?;
        let decoding_key = parse_decoding_key(algorithm, public_key_pem.as_bytes())?;

        Ok(Self {
            algorithm,
            source: KeySource::Memory,
            encoding_key: OnceCell::with_value(encoding_key),
            decoding_key: OnceCell::with_value(decoding_key),
        })
    }

    /// Algorithm the keys are used with
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the private key, loading it on first call
    pub fn signing_key(&self) -> DomainResult<&EncodingKey> {
        self.encoding_key.get_or_try_init(|| match &self.source {
            KeySource::Files {
                private_key_path, ..
            } => {
                let pem = read_key_file(private_key_path, "private")?;
                let key = parse_encoding_key(self.algorithm, &pem)?;
                info!(path = %private_key_path.display(), "Loaded signing key");
                Ok(key)
            }
            KeySource::Memory => Err(missing_memory_key("private")),
        })
    }

    /// Returns the public key, loading it on first call
    pub fn verification_key(&self) -> DomainResult<&DecodingKey> {
        self.decoding_key.get_or_try_init(|| match &self.source {
            KeySource::Files {
                public_key_path, ..
            } => {
                let pem = read_key_file(public_key_path, "public")?;
                let key = parse_decoding_key(self.algorithm, &pem)?;
                info!(path = %public_key_path.display(), "Loaded verification key");
                Ok(key)
            }
            KeySource::Memory => Err(missing_memory_key("public")),
        })
    }

    /// Loads both keys and checks that they form a matching pair
    ///
    /// Meant for process startup so that unusable key material aborts boot
    /// instead of surfacing on the first request.
    pub fn preload(&self) -> DomainResult<()> {
        self.signing_key()?;
        self.verification_key()?;
        self.validate()
    }

    /// Signs and verifies a throwaway token with the loaded keys
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The private key's signatures verify under the public key
    /// * `Err(DomainError)` - Keys unavailable or not a matching pair
    pub fn validate(&self) -> DomainResult<()> {
        #[derive(Serialize, Deserialize)]
        struct SelfTest {
            check: String,
        }

        let header = Header::new(self.algorithm);
        let payload = SelfTest {
            check: "keypair-self-test".to_string(),
        };
        let token = jsonwebtoken::encode(&header, &payload, self.signing_key()?).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("Signing with private key failed: {}", e),
            })
        })?;

        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        jsonwebtoken::decode::<SelfTest>(&token, self.verification_key()?, &validation).map_err(
            |e| {
                DomainError::Token(TokenError::KeyLoadError {
                    message: format!("Public key does not verify private key signatures: {}", e),
                })
            },
        )?;

        debug!(algorithm = ?self.algorithm, "Keypair self-test passed");
        Ok(())
    }
}

fn read_key_file(path: &Path, which: &str) -> DomainResult<Vec<u8>> {
    fs::read(path).map_err(|e| {
        DomainError::Token(TokenError::KeyLoadError {
            message: format!("Failed to read {} key {}: {}", which, path.display(), e),
        })
    })
}

fn missing_memory_key(which: &str) -> DomainError {
    DomainError::Token(TokenError::KeyLoadError {
        message: format!("No {} key loaded", which),
    })
}

fn parse_encoding_key(algorithm: Algorithm, pem: &[u8]) -> DomainResult<EncodingKey> {
    let parsed = match algorithm {
        Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_pem(pem),
        Algorithm::EdDSA => EncodingKey::from_ed_pem(pem),
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            return Err(unsupported(algorithm));
        }
        _ => EncodingKey::from_rsa_pem(pem),
    };

    parsed.map_err(|e| {
        DomainError::Token(TokenError::KeyLoadError {
            message: format!("Invalid private key format: {}", e),
        })
    })
}

fn parse_decoding_key(algorithm: Algorithm, pem: &[u8]) -> DomainResult<DecodingKey> {
    let parsed = match algorithm {
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(pem),
        Algorithm::EdDSA => DecodingKey::from_ed_pem(pem),
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            return Err(unsupported(algorithm));
        }
        _ => DecodingKey::from_rsa_pem(pem),
    };

    parsed.map_err(|e| {
        DomainError::Token(TokenError::KeyLoadError {
            message: format!("Invalid public key format: {}", e),
        })
    })
}

fn unsupported(algorithm: Algorithm) -> DomainError {
    DomainError::Token(TokenError::UnsupportedAlgorithm {
        algorithm: format!("{:?}", algorithm),
    })
}
