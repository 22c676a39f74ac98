//! RSA key pair loading.
//!
//! Key material is read once at startup from configured locations and shared
//! read-only (behind `Arc`) by the issuer and the verifier.

use crate::crypto::EXPECTED_ALGORITHM;
use crate::observability::metrics::record_key_load;
use jsonwebtoken::{crypto, DecodingKey, EncodingKey};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROBE_MESSAGE: &[u8] = b"wasselli-key-pair-probe";

#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("Failed to read key file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid RSA private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid RSA public key: {0}")]
    InvalidPublicKey(String),

    #[error("Public key does not match private key")]
    Mismatch,
}

/// Matched RSA signing and verification keys.
pub struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &"[REDACTED]")
            .finish()
    }
}

impl KeyPair {
    /// Read and parse a PEM private key and its PEM public key from disk.
    #[tracing::instrument(skip_all, name = "auth.keys.load")]
    pub fn load(private_key_path: &Path, public_key_path: &Path) -> Result<Self, KeyLoadError> {
        let result = read_key_file(private_key_path).and_then(|private_pem| {
            let public_pem = read_key_file(public_key_path)?;
            Self::from_pem(&private_pem, &public_pem)
        });

        match &result {
            Ok(_) => {
                record_key_load("success");
                tracing::info!(
                    target: "auth.keys",
                    private_key_path = %private_key_path.display(),
                    public_key_path = %public_key_path.display(),
                    "RSA key pair loaded"
                );
            }
            Err(e) => {
                record_key_load("error");
                tracing::error!(target: "auth.keys", error = %e, "Failed to load RSA key pair");
            }
        }

        result
    }

    /// Parse a PEM private key (PKCS#1 or PKCS#8) and a PEM public key
    /// (PKIX or PKCS#1), then confirm they belong together.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyLoadError> {
        let encoding = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| KeyLoadError::InvalidPrivateKey(e.to_string()))?;
        let decoding = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| KeyLoadError::InvalidPublicKey(e.to_string()))?;

        let pair = KeyPair { encoding, decoding };
        pair.check_matched()?;
        Ok(pair)
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    // PEM parsing accepts any DER payload, so a sign/verify round trip is the
    // only way to prove the private half is usable and the halves match.
    fn check_matched(&self) -> Result<(), KeyLoadError> {
        let signature = crypto::sign(PROBE_MESSAGE, &self.encoding, EXPECTED_ALGORITHM)
            .map_err(|e| KeyLoadError::InvalidPrivateKey(e.to_string()))?;

        match crypto::verify(&signature, PROBE_MESSAGE, &self.decoding, EXPECTED_ALGORITHM) {
            Ok(true) => Ok(()),
            Ok(false) => Err(KeyLoadError::Mismatch),
            Err(e) => Err(KeyLoadError::InvalidPublicKey(e.to_string())),
        }
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyLoadError> {
    std::fs::read(path).map_err(|source| KeyLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
