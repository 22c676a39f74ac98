//! Builders for hand-crafted tokens.
//!
//! `TokenIssuer` only ever produces well-formed RS256 tokens. These builders
//! produce the tokens an attacker or a buggy client might send instead.

use crate::crypto_fixtures::{PRIMARY_PRIVATE_PEM, ROGUE_PRIVATE_PEM};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::{crypto, Algorithm, EncodingKey};
use serde_json::{json, Map, Value};

/// Builder for test tokens with arbitrary headers and claims.
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_subject("u-42")
///     .with_role("rider")
///     .expires_in(Duration::minutes(-1))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TestTokenBuilder {
    header: Map<String, Value>,
    claims: Map<String, Value>,
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTokenBuilder {
    /// A rider token for `u-test` issued now, valid for 15 minutes.
    pub fn new() -> Self {
        let now = Utc::now().timestamp();
        let mut header = Map::new();
        header.insert("alg".to_string(), json!("RS256"));
        header.insert("typ".to_string(), json!("JWT"));

        let mut claims = Map::new();
        claims.insert("sub".to_string(), json!("u-test"));
        claims.insert("role".to_string(), json!("rider"));
        claims.insert("iss".to_string(), json!("Wasselli App"));
        claims.insert("iat".to_string(), json!(now));
        claims.insert("exp".to_string(), json!(now + 15 * 60));

        Self { header, claims }
    }

    pub fn for_subject(mut self, subject: &str) -> Self {
        self.claims.insert("sub".to_string(), json!(subject));
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.claims.insert("role".to_string(), json!(role));
        self
    }

    /// Set `exp` relative to now. Negative durations give expired tokens.
    pub fn expires_in(mut self, lifetime: Duration) -> Self {
        let exp = Utc::now().timestamp() + lifetime.num_seconds();
        self.claims.insert("exp".to_string(), json!(exp));
        self
    }

    pub fn with_claim(mut self, name: &str, value: Value) -> Self {
        self.claims.insert(name.to_string(), value);
        self
    }

    pub fn without_claim(mut self, name: &str) -> Self {
        self.claims.remove(name);
        self
    }

    /// Override the header `alg`. Signing still uses RS256.
    pub fn with_header_alg(mut self, alg: &str) -> Self {
        self.header.insert("alg".to_string(), json!(alg));
        self
    }

    /// `header.payload` with no signature.
    pub fn signing_input(&self) -> String {
        format!(
            "{}.{}",
            encode_segment(&Value::Object(self.header.clone())),
            encode_segment(&Value::Object(self.claims.clone()))
        )
    }

    /// Sign with the primary test key.
    pub fn build(self) -> String {
        self.sign_rs256(PRIMARY_PRIVATE_PEM)
    }

    /// Sign with a key the server does not trust.
    pub fn build_with_rogue_key(self) -> String {
        self.sign_rs256(ROGUE_PRIVATE_PEM)
    }

    /// `alg: none` with an empty signature segment.
    pub fn build_unsigned(self) -> String {
        format!("{}.", self.with_header_alg("none").signing_input())
    }

    /// HS256 token keyed with `secret`, e.g. the server's public key PEM.
    pub fn build_hs256(self, secret: &[u8]) -> String {
        let signing_input = self.with_header_alg("HS256").signing_input();
        let signature = crypto::sign(
            signing_input.as_bytes(),
            &EncodingKey::from_secret(secret),
            Algorithm::HS256,
        )
        .expect("HMAC signing should not fail");
        format!("{}.{}", signing_input, signature)
    }

    fn sign_rs256(self, private_pem: &str) -> String {
        let key = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .expect("fixture private key should parse");
        let signing_input = self.signing_input();
        let signature = crypto::sign(signing_input.as_bytes(), &key, Algorithm::RS256)
            .expect("RS256 signing should not fail");
        format!("{}.{}", signing_input, signature)
    }
}

/// Flip one character in the middle of the signature segment.
pub fn tamper_signature(token: &str) -> String {
    let (signing_input, signature) = token
        .rsplit_once('.')
        .expect("token should have a signature segment");
    let mut chars: Vec<char> = signature.chars().collect();
    assert!(!chars.is_empty(), "signature segment is empty");
    let middle = chars.len() / 2;
    chars[middle] = if chars[middle] == 'A' { 'B' } else { 'A' };
    format!("{}.{}", signing_input, chars.into_iter().collect::<String>())
}

fn encode_segment(value: &Value) -> String {
    URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).expect("JSON values always serialize"))
}
