//! Prometheus metrics endpoint handler.
//!
//! Unauthenticated so Prometheus can scrape it. Metrics carry no subjects,
//! tokens or key material, only bounded-cardinality labels.

use axum::{extract::State, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Handler for GET /metrics
#[tracing::instrument(skip_all, name = "auth.handlers.metrics")]
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
