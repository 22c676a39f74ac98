//! Token verification.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. structure (size, three segments, decodable header) -> `MalformedToken`
//! 2. header `alg` must be exactly RS256 -> `AlgorithmMismatch`
//! 3. RS256 signature over `header.payload` -> `InvalidSignature`
//! 4. payload decodes into [`Claims`] -> `MalformedClaims`
//! 5. `exp` is still in the future -> `Expired`
//!
//! The algorithm check happens before any signature work and the signature
//! is always verified with RS256 regardless of what the header says.

use crate::crypto::{
    Claims, KeyPair, EXPECTED_ALGORITHM, EXPECTED_ALGORITHM_NAME, MAX_JWT_SIZE_BYTES,
};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_token_validation;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use jsonwebtoken::crypto;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Why a token was rejected.
///
/// Used internally for logs and metrics only. Callers of the HTTP API always
/// see the same generic invalid-token response.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("token is structurally malformed")]
    MalformedToken,

    #[error("token declares an unexpected signing algorithm")]
    AlgorithmMismatch,

    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token claims are malformed")]
    MalformedClaims,

    #[error("token has expired")]
    Expired,
}

impl Rejection {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::MalformedToken => "malformed_token",
            Rejection::AlgorithmMismatch => "algorithm_mismatch",
            Rejection::InvalidSignature => "invalid_signature",
            Rejection::MalformedClaims => "malformed_claims",
            Rejection::Expired => "expired",
        }
    }
}

/// Seam between the authentication gate and token verification.
pub trait VerifyToken: Send + Sync {
    fn verify_token(&self, token: &str) -> Result<Claims, Rejection>;
}

#[derive(Deserialize)]
struct TokenHeader {
    alg: String,
}

/// Verifies RS256 tokens against the public half of a [`KeyPair`].
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    keys: Arc<KeyPair>,
    leeway_seconds: i64,
}

impl TokenVerifier {
    pub fn new(keys: Arc<KeyPair>) -> Self {
        Self {
            keys,
            leeway_seconds: 0,
        }
    }

    /// Accept tokens for `leeway_seconds` past their `exp`. Negative values
    /// are treated as zero.
    pub fn with_leeway(mut self, leeway_seconds: i64) -> Self {
        self.leeway_seconds = leeway_seconds.max(0);
        self
    }

    pub fn verify(&self, token: &str) -> Result<Claims, Rejection> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify as if the current time were `now` (unix seconds).
    #[tracing::instrument(skip_all, name = "auth.crypto.verify")]
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, Rejection> {
        let result = self.check(token, now);

        match &result {
            Ok(claims) => {
                record_token_validation("success", None);
                tracing::debug!(
                    target: "auth.crypto",
                    subject = %hash_for_correlation(&claims.subject_id),
                    "Token verified"
                );
            }
            Err(rejection) => {
                record_token_validation("error", Some(rejection.as_str()));
                tracing::debug!(
                    target: "auth.crypto",
                    reason = rejection.as_str(),
                    token_size = token.len(),
                    "Token rejected"
                );
            }
        }

        result
    }

    fn check(&self, token: &str, now: i64) -> Result<Claims, Rejection> {
        if token.len() > MAX_JWT_SIZE_BYTES {
            return Err(Rejection::MalformedToken);
        }

        let (signing_input, signature) =
            token.rsplit_once('.').ok_or(Rejection::MalformedToken)?;
        let (header_b64, payload_b64) = signing_input
            .split_once('.')
            .ok_or(Rejection::MalformedToken)?;
        if header_b64.is_empty() || payload_b64.is_empty() || payload_b64.contains('.') {
            return Err(Rejection::MalformedToken);
        }

        let header: TokenHeader = URL_SAFE_NO_PAD
            .decode(header_b64)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(Rejection::MalformedToken)?;

        if header.alg != EXPECTED_ALGORITHM_NAME {
            return Err(Rejection::AlgorithmMismatch);
        }

        let signature_valid = crypto::verify(
            signature,
            signing_input.as_bytes(),
            self.keys.decoding_key(),
            EXPECTED_ALGORITHM,
        )
        .map_err(|_| Rejection::InvalidSignature)?;
        if !signature_valid {
            return Err(Rejection::InvalidSignature);
        }

        let claims: Claims = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(Rejection::MalformedClaims)?;
        if claims.subject_id.is_empty() || claims.role.is_empty() {
            return Err(Rejection::MalformedClaims);
        }

        if now >= claims.expires_at.saturating_add(self.leeway_seconds) {
            return Err(Rejection::Expired);
        }

        Ok(claims)
    }
}

impl VerifyToken for TokenVerifier {
    fn verify_token(&self, token: &str) -> Result<Claims, Rejection> {
        self.verify(token)
    }
}
