//! Metrics definitions for the authentication service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `auth_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `status`: 2 values (success, error)
//! - `reason`: rejection reasons plus gate-level reasons, `none` on success

use metrics::{counter, histogram};
use std::time::Duration;

/// Record token issuance duration and outcome.
///
/// Metrics: `auth_token_issuance_duration_seconds`, `auth_token_issued_total`
/// Labels: `status`
pub fn record_token_issuance(status: &str, duration: Duration) {
    histogram!("auth_token_issuance_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("auth_token_issued_total", "status" => status.to_string()).increment(1);
}

/// Record a token validation outcome.
///
/// Metric: `auth_token_validations_total`
/// Labels: `status`, `reason`
pub fn record_token_validation(status: &str, reason: Option<&str>) {
    let reason = reason.unwrap_or("none");
    counter!("auth_token_validations_total", "status" => status.to_string(), "reason" => reason.to_string())
        .increment(1);
}

/// Record a key pair load attempt.
///
/// Metric: `auth_key_load_total`
/// Labels: `status`
pub fn record_key_load(status: &str) {
    counter!("auth_key_load_total", "status" => status.to_string()).increment(1);
}
