//! Token issuance.
//!
//! Invoked by the login and registration flows once a caller has been
//! authenticated by other means. Issued tokens are never stored.

use crate::crypto::{Claims, KeyPair, EXPECTED_ALGORITHM, TOKEN_ISSUER};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_token_issuance;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Header};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    #[error("Subject must not be empty")]
    EmptySubject,

    #[error("Role must not be empty")]
    EmptyRole,

    #[error("Token lifetime must be at least one second")]
    InvalidLifetime,

    #[error("Token signing failed: {0}")]
    Crypto(String),
}

/// Signs RS256 tokens with the private half of a [`KeyPair`].
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    keys: Arc<KeyPair>,
}

impl TokenIssuer {
    pub fn new(keys: Arc<KeyPair>) -> Self {
        Self { keys }
    }

    /// Issue a token for `subject_id` that expires `lifetime` from now.
    pub fn issue(
        &self,
        subject_id: &str,
        role: &str,
        lifetime: Duration,
    ) -> Result<String, SigningError> {
        self.issue_at(subject_id, role, lifetime, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    #[tracing::instrument(skip_all, name = "auth.crypto.issue")]
    pub fn issue_at(
        &self,
        subject_id: &str,
        role: &str,
        lifetime: Duration,
        now: i64,
    ) -> Result<String, SigningError> {
        let start = Instant::now();
        let result = self.sign_claims(subject_id, role, lifetime, now);

        match &result {
            Ok(_) => {
                record_token_issuance("success", start.elapsed());
                tracing::debug!(
                    target: "auth.crypto",
                    subject = %hash_for_correlation(subject_id),
                    role = %role,
                    lifetime_seconds = lifetime.num_seconds(),
                    "Token issued"
                );
            }
            Err(e) => {
                record_token_issuance("error", start.elapsed());
                tracing::warn!(target: "auth.crypto", error = %e, "Token issuance failed");
            }
        }

        result
    }

    fn sign_claims(
        &self,
        subject_id: &str,
        role: &str,
        lifetime: Duration,
        now: i64,
    ) -> Result<String, SigningError> {
        if subject_id.is_empty() {
            return Err(SigningError::EmptySubject);
        }
        if role.is_empty() {
            return Err(SigningError::EmptyRole);
        }

        let lifetime_seconds = lifetime.num_seconds();
        if lifetime_seconds < 1 {
            return Err(SigningError::InvalidLifetime);
        }
        let expires_at = now
            .checked_add(lifetime_seconds)
            .ok_or(SigningError::InvalidLifetime)?;

        let claims = Claims {
            subject_id: subject_id.to_string(),
            role: role.to_string(),
            issuer: TOKEN_ISSUER.to_string(),
            expires_at,
            issued_at: Some(now),
        };

        // Header::new sets typ to "JWT".
        let header = Header::new(EXPECTED_ALGORITHM);

        encode(&header, &claims, self.keys.encoding_key())
            .map_err(|e| SigningError::Crypto(e.to_string()))
    }
}
