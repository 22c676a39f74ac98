//! Token cryptography.
//!
//! - `keys` loads the RSA key pair shared by issuance and verification
//! - `issuer` produces signed RS256 tokens
//! - `verifier` checks structure, algorithm, signature and expiry
//!
//! The signing algorithm is fixed to RS256. Neither the issuer nor the
//! verifier lets a caller or a token header choose another algorithm.

pub mod issuer;
pub mod keys;
pub mod verifier;

pub use issuer::{SigningError, TokenIssuer};
pub use keys::{KeyLoadError, KeyPair};
pub use verifier::{Rejection, TokenVerifier, VerifyToken};

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the issuing service, written into every token's `iss` claim.
pub const TOKEN_ISSUER: &str = "Wasselli App";

/// The only algorithm this service signs with or accepts.
pub const EXPECTED_ALGORITHM: Algorithm = Algorithm::RS256;

/// Header `alg` value matching [`EXPECTED_ALGORITHM`].
pub const EXPECTED_ALGORITHM_NAME: &str = "RS256";

/// Maximum accepted token size in bytes.
///
/// Checked before any base64 decoding or signature work. An RS256 token with
/// the claims below is roughly 500 bytes.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// Identity claims carried inside a token.
///
/// The subject identifies a user and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Opaque subject identifier.
    #[serde(rename = "sub")]
    pub subject_id: String,

    /// Opaque authorization tag.
    pub role: String,

    /// Issuing service identity.
    #[serde(rename = "iss")]
    pub issuer: String,

    /// Expiry as a unix timestamp in seconds.
    #[serde(rename = "exp")]
    pub expires_at: i64,

    /// Issue time as a unix timestamp in seconds.
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("subject_id", &"[REDACTED]")
            .field("role", &self.role)
            .field("issuer", &self.issuer)
            .field("expires_at", &self.expires_at)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
