//! Integration tests for loading key material from disk.

use auth_service::crypto::{KeyLoadError, KeyPair, TokenIssuer, TokenVerifier};
use auth_test_utils::{
    write_key_files, TokenAssertions, EC_PRIVATE_PEM, PRIMARY_PRIVATE_PEM, PRIMARY_PUBLIC_PEM,
    ROGUE_PRIVATE_PEM, ROGUE_PUBLIC_PEM,
};
use chrono::Duration;
use std::path::Path;
use std::sync::Arc;

#[test]
fn test_load_pkcs1_pair_from_disk() -> Result<(), anyhow::Error> {
    let files = write_key_files(PRIMARY_PRIVATE_PEM, PRIMARY_PUBLIC_PEM)?;

    let keys = KeyPair::load(&files.private_key_path, &files.public_key_path)?;
    let keys = Arc::new(keys);

    let token = TokenIssuer::new(keys.clone()).issue("u-42", "rider", Duration::minutes(15))?;
    token.assert_valid_jwt().assert_for_subject("u-42");

    let claims = TokenVerifier::new(keys).verify(&token)?;
    assert_eq!(claims.role, "rider");

    Ok(())
}

#[test]
fn test_load_pkcs8_pair_from_disk() -> Result<(), anyhow::Error> {
    let files = write_key_files(ROGUE_PRIVATE_PEM, ROGUE_PUBLIC_PEM)?;

    let result = KeyPair::load(&files.private_key_path, &files.public_key_path);
    assert!(result.is_ok(), "PKCS#8 pair should load: {:?}", result.err());

    Ok(())
}

#[test]
fn test_repeated_loads_are_equivalent() -> Result<(), anyhow::Error> {
    let files = write_key_files(PRIMARY_PRIVATE_PEM, PRIMARY_PUBLIC_PEM)?;

    let first = Arc::new(KeyPair::load(&files.private_key_path, &files.public_key_path)?);
    let second = Arc::new(KeyPair::load(&files.private_key_path, &files.public_key_path)?);

    let token = TokenIssuer::new(first).issue("u-42", "rider", Duration::minutes(15))?;
    let claims = TokenVerifier::new(second).verify(&token)?;
    assert_eq!(claims.subject_id, "u-42");

    Ok(())
}

#[test]
fn test_missing_public_key_file() -> Result<(), anyhow::Error> {
    let files = write_key_files(PRIMARY_PRIVATE_PEM, PRIMARY_PUBLIC_PEM)?;
    let missing = files.public_key_path.with_file_name("absent.pem");

    let err = KeyPair::load(&files.private_key_path, &missing).unwrap_err();

    match err {
        KeyLoadError::Read { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Read error, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_directory_instead_of_file() -> Result<(), anyhow::Error> {
    let files = write_key_files(PRIMARY_PRIVATE_PEM, PRIMARY_PUBLIC_PEM)?;
    let directory = files
        .private_key_path
        .parent()
        .unwrap_or(Path::new("/"))
        .to_path_buf();

    let err = KeyPair::load(&directory, &files.public_key_path).unwrap_err();
    assert!(matches!(err, KeyLoadError::Read { .. }));

    Ok(())
}

#[test]
fn test_ec_key_is_rejected() -> Result<(), anyhow::Error> {
    let files = write_key_files(EC_PRIVATE_PEM, PRIMARY_PUBLIC_PEM)?;

    let err = KeyPair::load(&files.private_key_path, &files.public_key_path).unwrap_err();
    assert!(matches!(err, KeyLoadError::InvalidPrivateKey(_)));

    Ok(())
}

#[test]
fn test_public_key_in_private_slot_is_rejected() -> Result<(), anyhow::Error> {
    let files = write_key_files(PRIMARY_PUBLIC_PEM, PRIMARY_PUBLIC_PEM)?;

    let result = KeyPair::load(&files.private_key_path, &files.public_key_path);
    assert!(result.is_err());

    Ok(())
}

#[test]
fn test_mismatched_pair_is_rejected() -> Result<(), anyhow::Error> {
    let files = write_key_files(PRIMARY_PRIVATE_PEM, ROGUE_PUBLIC_PEM)?;

    let err = KeyPair::load(&files.private_key_path, &files.public_key_path).unwrap_err();
    assert!(matches!(err, KeyLoadError::Mismatch));

    Ok(())
}

#[test]
fn test_error_messages_do_not_contain_key_material() -> Result<(), anyhow::Error> {
    let files = write_key_files(PRIMARY_PRIVATE_PEM, ROGUE_PUBLIC_PEM)?;

    let err = KeyPair::load(&files.private_key_path, &files.public_key_path).unwrap_err();
    let message = err.to_string();
    assert!(!message.contains("BEGIN"));
    assert!(!message.contains("MII"));

    Ok(())
}
