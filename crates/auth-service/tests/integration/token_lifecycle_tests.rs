//! Issue/verify lifecycle through the public library API.

use auth_service::crypto::{Rejection, SigningError, TokenIssuer, TokenVerifier};
use auth_test_utils::{
    rogue_key_pair, tamper_signature, test_key_pair, TestTokenBuilder, TokenAssertions,
    PRIMARY_PUBLIC_PEM,
};
use chrono::{Duration, Utc};
use serde_json::json;

#[test]
fn test_rider_scenario() -> Result<(), anyhow::Error> {
    let keys = test_key_pair();
    let issuer = TokenIssuer::new(keys.clone());
    let verifier = TokenVerifier::new(keys);
    let now = Utc::now().timestamp();

    let token = issuer.issue_at("u-42", "rider", Duration::minutes(15), now)?;
    token
        .assert_valid_jwt()
        .assert_for_subject("u-42")
        .assert_has_role("rider")
        .assert_expires_in(15 * 60);

    let claims = verifier.verify_at(&token, now)?;
    assert_eq!(claims.subject_id, "u-42");
    assert_eq!(claims.role, "rider");
    assert_eq!(claims.expires_at, now + 15 * 60);

    assert_eq!(
        verifier.verify_at(&token, now + 16 * 60),
        Err(Rejection::Expired)
    );
    assert_eq!(
        verifier.verify_at(&tamper_signature(&token), now),
        Err(Rejection::InvalidSignature)
    );

    Ok(())
}

#[test]
fn test_issuance_errors_are_distinguishable() {
    let issuer = TokenIssuer::new(test_key_pair());

    assert_eq!(
        issuer.issue("", "rider", Duration::minutes(15)),
        Err(SigningError::EmptySubject)
    );
    assert_eq!(
        issuer.issue("u-42", "", Duration::minutes(15)),
        Err(SigningError::EmptyRole)
    );
    assert_eq!(
        issuer.issue("u-42", "rider", Duration::zero()),
        Err(SigningError::InvalidLifetime)
    );
}

#[test]
fn test_hostile_tokens_map_to_rejection_reasons() {
    let verifier = TokenVerifier::new(test_key_pair());

    let cases = [
        (
            "expired",
            TestTokenBuilder::new()
                .expires_in(Duration::minutes(-5))
                .build(),
            Rejection::Expired,
        ),
        (
            "rogue key",
            TestTokenBuilder::new().build_with_rogue_key(),
            Rejection::InvalidSignature,
        ),
        (
            "alg none",
            TestTokenBuilder::new().build_unsigned(),
            Rejection::AlgorithmMismatch,
        ),
        (
            "hs256 with public key",
            TestTokenBuilder::new().build_hs256(PRIMARY_PUBLIC_PEM.as_bytes()),
            Rejection::AlgorithmMismatch,
        ),
        (
            "ES256 header",
            TestTokenBuilder::new().with_header_alg("ES256").build(),
            Rejection::AlgorithmMismatch,
        ),
        (
            "missing exp",
            TestTokenBuilder::new().without_claim("exp").build(),
            Rejection::MalformedClaims,
        ),
        (
            "missing role",
            TestTokenBuilder::new().without_claim("role").build(),
            Rejection::MalformedClaims,
        ),
        (
            "string exp",
            TestTokenBuilder::new()
                .with_claim("exp", json!("never"))
                .build(),
            Rejection::MalformedClaims,
        ),
        ("garbage", "abc".to_string(), Rejection::MalformedToken),
    ];

    for (label, token, expected) in cases {
        assert_eq!(verifier.verify(&token), Err(expected), "{}", label);
    }
}

#[test]
fn test_rogue_issuer_cannot_forge_for_primary_verifier() -> Result<(), anyhow::Error> {
    let rogue_token =
        TokenIssuer::new(rogue_key_pair()).issue("u-42", "admin", Duration::minutes(15))?;

    assert_eq!(
        TokenVerifier::new(test_key_pair()).verify(&rogue_token),
        Err(Rejection::InvalidSignature)
    );

    Ok(())
}

#[test]
fn test_extra_claims_are_ignored() -> Result<(), anyhow::Error> {
    let token = TestTokenBuilder::new()
        .for_subject("u-7")
        .with_claim("email", json!("rider@example.com"))
        .build();

    let claims = TokenVerifier::new(test_key_pair()).verify(&token)?;
    assert_eq!(claims.subject_id, "u-7");

    Ok(())
}

#[test]
fn test_leeway_accepts_recently_expired_token() -> Result<(), anyhow::Error> {
    let token = TestTokenBuilder::new()
        .expires_in(Duration::seconds(-10))
        .build();

    assert_eq!(
        TokenVerifier::new(test_key_pair()).verify(&token),
        Err(Rejection::Expired)
    );
    let claims = TokenVerifier::new(test_key_pair())
        .with_leeway(60)
        .verify(&token)?;
    assert_eq!(claims.subject_id, "u-test");

    Ok(())
}
