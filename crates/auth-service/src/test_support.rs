//! Key fixtures shared by unit tests inside this crate.
//!
//! Integration tests use `auth-test-utils` instead; the PEM files live there.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::crypto::keys::KeyPair;
use std::sync::Arc;

pub const PRIMARY_PRIVATE_PEM: &str =
    include_str!("../../auth-test-utils/fixtures/primary_private.pem");
pub const PRIMARY_PUBLIC_PEM: &str =
    include_str!("../../auth-test-utils/fixtures/primary_public.pem");
pub const ROGUE_PRIVATE_PEM: &str = include_str!("../../auth-test-utils/fixtures/rogue_private.pem");
pub const ROGUE_PUBLIC_PEM: &str = include_str!("../../auth-test-utils/fixtures/rogue_public.pem");
pub const EC_PRIVATE_PEM: &str = include_str!("../../auth-test-utils/fixtures/ec_private.pem");

pub fn primary_keys() -> Arc<KeyPair> {
    Arc::new(
        KeyPair::from_pem(PRIMARY_PRIVATE_PEM.as_bytes(), PRIMARY_PUBLIC_PEM.as_bytes())
            .expect("primary fixture keys should load"),
    )
}

pub fn rogue_keys() -> Arc<KeyPair> {
    Arc::new(
        KeyPair::from_pem(ROGUE_PRIVATE_PEM.as_bytes(), ROGUE_PUBLIC_PEM.as_bytes())
            .expect("rogue fixture keys should load"),
    )
}
