//! Observability for the authentication service.
//!
//! # Privacy by Default
//!
//! Instrumented functions use `#[instrument(skip_all)]` and log an explicit
//! allow-list of fields:
//! - **SAFE**: logged in plaintext (roles, rejection reasons, sizes)
//! - **HASHED**: SHA-256 hashed for correlation (subject identifiers)
//! - **NEVER**: must never appear in logs (tokens, key material)

pub mod metrics;

use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs.
///
/// Returns `h:` followed by the first 8 hex chars of the SHA-256 digest.
/// This is a one-way correlation aid, not protection for secrets.
pub fn hash_for_correlation(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let prefix = digest.get(..4).unwrap_or_default();
    format!("h:{}", hex::encode(prefix))
}
