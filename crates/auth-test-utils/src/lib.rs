//! # Auth Test Utilities
//!
//! Shared test utilities for the authentication service.
//!
//! This crate provides:
//! - Fixed RSA key fixtures (a primary pair, a rogue pair, an EC key)
//! - Hand-built tokens for hostile inputs (TestTokenBuilder)
//! - Server test harness (TestAuthServer for E2E tests)
//! - Custom assertions (TokenAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestAuthServer::spawn().await?;
//!     let token = server.issue_token("u-42", "rider", chrono::Duration::minutes(15))?;
//!
//!     token.assert_valid_jwt().assert_for_subject("u-42");
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod crypto_fixtures;
pub mod server_harness;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use crypto_fixtures::*;
pub use server_harness::*;
pub use token_builders::*;
