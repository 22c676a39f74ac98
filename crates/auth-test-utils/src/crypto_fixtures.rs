//! Fixed key material for reproducible tests.
//!
//! The PEM files under `fixtures/` are 2048-bit RSA keys generated once with
//! openssl. They protect nothing and must never be used outside tests.

use auth_service::crypto::KeyPair;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Primary private key, PKCS#1 (`BEGIN RSA PRIVATE KEY`).
pub const PRIMARY_PRIVATE_PEM: &str = include_str!("../fixtures/primary_private.pem");

/// Primary public key, PKIX (`BEGIN PUBLIC KEY`).
pub const PRIMARY_PUBLIC_PEM: &str = include_str!("../fixtures/primary_public.pem");

/// Unrelated private key, PKCS#8 (`BEGIN PRIVATE KEY`).
pub const ROGUE_PRIVATE_PEM: &str = include_str!("../fixtures/rogue_private.pem");

/// Public half of the rogue key.
pub const ROGUE_PUBLIC_PEM: &str = include_str!("../fixtures/rogue_public.pem");

/// P-256 private key, PKCS#8. Valid PEM, wrong key type.
pub const EC_PRIVATE_PEM: &str = include_str!("../fixtures/ec_private.pem");

/// The key pair the test server signs and verifies with.
pub fn test_key_pair() -> Arc<KeyPair> {
    Arc::new(
        KeyPair::from_pem(PRIMARY_PRIVATE_PEM.as_bytes(), PRIMARY_PUBLIC_PEM.as_bytes())
            .expect("primary fixture keys should load"),
    )
}

/// A valid key pair unrelated to [`test_key_pair`].
pub fn rogue_key_pair() -> Arc<KeyPair> {
    Arc::new(
        KeyPair::from_pem(ROGUE_PRIVATE_PEM.as_bytes(), ROGUE_PUBLIC_PEM.as_bytes())
            .expect("rogue fixture keys should load"),
    )
}

/// Key files written to a temporary directory, removed on drop.
pub struct KeyFiles {
    _dir: TempDir,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
}

/// Write a private and public PEM to fresh files in a temporary directory.
pub fn write_key_files(private_pem: &str, public_pem: &str) -> Result<KeyFiles, anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let private_key_path = dir.path().join("private.pem");
    let public_key_path = dir.path().join("public.pem");

    std::fs::write(&private_key_path, private_pem)?;
    std::fs::write(&public_key_path, public_pem)?;

    Ok(KeyFiles {
        _dir: dir,
        private_key_path,
        public_key_path,
    })
}
