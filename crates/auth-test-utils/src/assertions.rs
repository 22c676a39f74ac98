//! Custom test assertions for expressive tests.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct JwtHeader {
    alg: String,
    typ: String,
}

#[derive(Debug, Deserialize)]
struct JwtClaims {
    sub: String,
    role: String,
    iss: String,
    exp: i64,
}

/// Custom assertions for issued tokens.
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_subject("u-42")
///     .assert_has_role("rider");
/// ```
pub trait TokenAssertions {
    /// Assert three segments, an RS256/JWT header and the service issuer.
    fn assert_valid_jwt(&self) -> &Self;

    fn assert_for_subject(&self, subject: &str) -> &Self;

    fn assert_has_role(&self, role: &str) -> &Self;

    /// Assert `exp` is between now and `seconds` from now.
    fn assert_expires_in(&self, seconds: i64) -> &Self;
}

fn decode_segment<T: for<'de> Deserialize<'de>>(token: &str, index: usize, what: &str) -> T {
    let segment = token
        .split('.')
        .nth(index)
        .unwrap_or_else(|| panic!("JWT has no {} segment", what));
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .unwrap_or_else(|e| panic!("Failed to base64 decode JWT {}: {}", what, e));
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("Failed to parse JWT {} JSON: {}", what, e))
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts = self.split('.').count();
        assert_eq!(
            parts, 3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts
        );

        let header: JwtHeader = decode_segment(self, 0, "header");
        assert_eq!(header.alg, "RS256", "Expected RS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        let claims: JwtClaims = decode_segment(self, 1, "payload");
        assert_eq!(claims.iss, "Wasselli App", "Unexpected issuer");
        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims: JwtClaims = decode_segment(self, 1, "payload");
        assert_eq!(claims.sub, subject, "Token subject mismatch");
        self
    }

    fn assert_has_role(&self, role: &str) -> &Self {
        let claims: JwtClaims = decode_segment(self, 1, "payload");
        assert_eq!(claims.role, role, "Token role mismatch");
        self
    }

    fn assert_expires_in(&self, seconds: i64) -> &Self {
        let claims: JwtClaims = decode_segment(self, 1, "payload");
        let now = Utc::now().timestamp();
        assert!(
            claims.exp > now && claims.exp <= now + seconds,
            "Token exp {} not within {} seconds of now ({})",
            claims.exp,
            seconds,
            now
        );
        self
    }
}
