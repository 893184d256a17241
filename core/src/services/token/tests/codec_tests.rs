//! Tests for token encoding and verification

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::Algorithm;

use crate::domain::entities::identity::{Identity, Role};
use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::services::test_support::*;
use crate::services::token::{KeyProvider, TokenCodec, TokenServiceConfig};

fn token_error(result: Result<Claims, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(err)) => err,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[test]
fn test_encode_decode_preserves_identity() {
    let codec = codec();
    let before = Utc::now().timestamp();
    let issued = codec.encode(&alice(), TokenKind::Access, 900).unwrap();
    let after = Utc::now().timestamp();

    let claims = codec.decode(&issued.token).unwrap();
    assert_eq!(claims.sub, "u1");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.role, Role::Manager);
    assert_eq!(claims.kind, TokenKind::Access);
    assert_eq!(claims.jti, issued.jti);
    assert_eq!(issued.expires_in, 900);
    assert!(claims.exp >= before + 900 && claims.exp <= after + 900);
}

#[test]
fn test_issue_uses_configured_lifetimes() {
    let codec = codec();

    let access = codec.issue(&alice(), TokenKind::Access).unwrap();
    let refresh = codec.issue(&alice(), TokenKind::Refresh).unwrap();

    assert_eq!(access.expires_in, 15 * 60);
    assert_eq!(refresh.expires_in, 7 * 24 * 3600);
    assert_eq!(codec.decode(&refresh.token).unwrap().kind, TokenKind::Refresh);
}

#[test]
fn test_each_token_gets_a_fresh_jti() {
    let codec = codec();
    let jtis: HashSet<String> = (0..20)
        .map(|_| codec.encode(&alice(), TokenKind::Access, 60).unwrap().jti)
        .collect();

    assert_eq!(jtis.len(), 20);
}

#[test]
fn test_zero_ttl_token_is_expired() {
    let codec = codec();
    let issued = codec.encode(&alice(), TokenKind::Access, 0).unwrap();

    assert_eq!(token_error(codec.decode(&issued.token)), TokenError::Expired);
}

#[test]
fn test_negative_ttl_token_is_expired() {
    let codec = codec();
    let issued = codec.encode(&alice(), TokenKind::Refresh, -60).unwrap();

    assert_eq!(token_error(codec.decode(&issued.token)), TokenError::Expired);
}

#[test]
fn test_tampering_any_character_is_detected() {
    let codec = codec();
    let token = codec.encode(&alice(), TokenKind::Access, 900).unwrap().token;
    let chars: Vec<char> = token.chars().collect();

    // The final character may only carry padding bits, so it is left alone.
    for i in 0..chars.len() - 1 {
        if chars[i] == '.' {
            continue;
        }
        let mut tampered = chars.clone();
        tampered[i] = if chars[i] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        let err = token_error(codec.decode(&tampered));
        assert!(
            matches!(err, TokenError::InvalidSignature | TokenError::Malformed),
            "position {} produced {:?}",
            i,
            err
        );
    }
}

#[test]
fn test_token_signed_by_other_key_is_rejected() {
    let other = Arc::new(
        KeyProvider::from_pem_strings(Algorithm::RS256, OTHER_PRIVATE_KEY_PEM, OTHER_PUBLIC_KEY_PEM)
            .unwrap(),
    );
    let foreign = TokenCodec::new(other, TokenServiceConfig::default());
    let token = foreign.encode(&alice(), TokenKind::Access, 900).unwrap().token;

    assert_eq!(
        token_error(codec().decode(&token)),
        TokenError::InvalidSignature
    );
}

#[test]
fn test_token_with_other_algorithm_is_rejected() {
    let ec = Arc::new(
        KeyProvider::from_pem_strings(Algorithm::ES256, EC_PRIVATE_KEY_PEM, EC_PUBLIC_KEY_PEM)
            .unwrap(),
    );
    let config = TokenServiceConfig {
        algorithm: Algorithm::ES256,
        ..TokenServiceConfig::default()
    };
    let ec_codec = TokenCodec::new(ec, config);
    let token = ec_codec.encode(&alice(), TokenKind::Access, 900).unwrap().token;

    assert!(ec_codec.decode(&token).is_ok());
    assert_eq!(
        token_error(codec().decode(&token)),
        TokenError::InvalidSignature
    );
}

#[test]
fn test_codec_signs_with_the_key_algorithm() {
    let ec = Arc::new(
        KeyProvider::from_pem_strings(Algorithm::ES256, EC_PRIVATE_KEY_PEM, EC_PUBLIC_KEY_PEM)
            .unwrap(),
    );
    // Default config names RS256, which EC keys cannot sign with
    let ec_codec = TokenCodec::new(ec, TokenServiceConfig::default());
    assert_eq!(ec_codec.config().algorithm, Algorithm::ES256);

    let token = ec_codec.issue(&alice(), TokenKind::Access).unwrap().token;
    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::ES256);
    assert_eq!(ec_codec.decode(&token).unwrap().identity(), alice());
}

#[test]
fn test_garbage_is_malformed() {
    let codec = codec();

    for input in ["", "garbage", "a.b", "a.b.c", "...", "Bearer"] {
        assert_eq!(
            token_error(codec.decode(input)),
            TokenError::Malformed,
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_missing_key_file_surfaces_on_first_use() {
    let keys = Arc::new(KeyProvider::new(
        Algorithm::RS256,
        fixture_path("missing.pem"),
        fixture_path("missing.pem"),
    ));
    let codec = TokenCodec::new(keys, TokenServiceConfig::default());

    assert!(matches!(
        codec.encode(&alice(), TokenKind::Access, 60),
        Err(DomainError::Token(TokenError::KeyLoadError { .. }))
    ));
    assert!(matches!(
        codec.decode("a.b.c"),
        Err(DomainError::Token(TokenError::KeyLoadError { .. }))
    ));
}

#[test]
fn test_every_role_survives_a_round_trip() {
    let codec = codec();

    for role in Role::ALL {
        let identity = Identity::new("u9", "erin", role);
        let token = codec.encode(&identity, TokenKind::Access, 60).unwrap().token;
        assert_eq!(codec.decode(&token).unwrap().identity(), identity);
    }
}
