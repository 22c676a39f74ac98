//! Authentication service configuration.
//!
//! Configuration is loaded once at startup from environment variables and
//! passed explicitly to every component that needs it.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default expiry leeway in seconds. Tokens expire exactly at `exp`.
pub const DEFAULT_JWT_EXPIRY_LEEWAY_SECONDS: i64 = 0;

/// Upper bound for the expiry leeway (10 minutes).
pub const MAX_JWT_EXPIRY_LEEWAY_SECONDS: i64 = 600;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Default bound on graceful shutdown in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 10;

/// Upper bound for both request and shutdown timeouts.
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Authentication service configuration.
///
/// Holds key locations only, never key material.
#[derive(Clone, Debug)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Location of the PEM-encoded RSA private key (PKCS#1 or PKCS#8).
    pub private_key_path: PathBuf,

    /// Location of the PEM-encoded RSA public key (PKIX or PKCS#1).
    pub public_key_path: PathBuf,

    /// Seconds a token is still accepted after its `exp`.
    pub jwt_expiry_leeway_seconds: i64,

    /// Per-request timeout applied by the router.
    pub request_timeout_seconds: u64,

    /// How long in-flight requests may run after a shutdown signal.
    pub shutdown_timeout_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWT expiry leeway configuration: {0}")]
    InvalidExpiryLeeway(String),

    #[error("Invalid timeout configuration: {0}")]
    InvalidTimeout(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let private_key_path = required_path(vars, "AUTH_PRIVATE_KEY_PATH")?;
        let public_key_path = required_path(vars, "AUTH_PUBLIC_KEY_PATH")?;

        let jwt_expiry_leeway_seconds = match vars.get("JWT_EXPIRY_LEEWAY_SECONDS") {
            Some(value_str) => {
                let value: i64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidExpiryLeeway(format!(
                        "JWT_EXPIRY_LEEWAY_SECONDS must be a valid integer, got '{}': {}",
                        value_str, e
                    ))
                })?;

                if value < 0 {
                    return Err(ConfigError::InvalidExpiryLeeway(format!(
                        "JWT_EXPIRY_LEEWAY_SECONDS must not be negative, got {}",
                        value
                    )));
                }

                if value > MAX_JWT_EXPIRY_LEEWAY_SECONDS {
                    return Err(ConfigError::InvalidExpiryLeeway(format!(
                        "JWT_EXPIRY_LEEWAY_SECONDS must not exceed {} seconds, got {}",
                        MAX_JWT_EXPIRY_LEEWAY_SECONDS, value
                    )));
                }

                value
            }
            None => DEFAULT_JWT_EXPIRY_LEEWAY_SECONDS,
        };

        let request_timeout_seconds = parse_timeout(
            vars,
            "REQUEST_TIMEOUT_SECONDS",
            DEFAULT_REQUEST_TIMEOUT_SECONDS,
        )?;
        let shutdown_timeout_seconds = parse_timeout(
            vars,
            "SHUTDOWN_TIMEOUT_SECONDS",
            DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
        )?;

        Ok(Config {
            bind_address,
            private_key_path,
            public_key_path,
            jwt_expiry_leeway_seconds,
            request_timeout_seconds,
            shutdown_timeout_seconds,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

fn required_path(vars: &HashMap<String, String>, name: &str) -> Result<PathBuf, ConfigError> {
    vars.get(name)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_timeout(
    vars: &HashMap<String, String>,
    name: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(value_str) = vars.get(name) else {
        return Ok(default);
    };

    let value: u64 = value_str.parse().map_err(|e| {
        ConfigError::InvalidTimeout(format!(
            "{} must be a valid positive integer, got '{}': {}",
            name, value_str, e
        ))
    })?;

    if value == 0 || value > MAX_TIMEOUT_SECONDS {
        return Err(ConfigError::InvalidTimeout(format!(
            "{} must be between 1 and {} seconds, got {}",
            name, MAX_TIMEOUT_SECONDS, value
        )));
    }

    Ok(value)
}
