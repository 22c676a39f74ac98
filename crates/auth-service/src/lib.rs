//! Wasselli Authentication Service Library
//!
//! Stateless token authentication: RS256 token issuance, verification of
//! tokens presented on protected requests, and propagation of the verified
//! identity to downstream handlers.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Key loading, token issuance and verification
//! - `middleware` - Authentication gate for protected routes
//! - `context` - Per-request authentication context and claims accessor
//! - `errors` - Error types and HTTP mapping
//! - `handlers` - HTTP request handlers
//! - `routes` - Router construction
//! - `observability` - Metrics and log-safe hashing

pub mod config;
pub mod context;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;
