//! HTTP routes for the authentication service.

use crate::handlers;
use crate::middleware::{require_auth, AuthGate};
use axum::{middleware::from_fn_with_state, routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Install the global Prometheus recorder.
///
/// Can only succeed once per process.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))
}

/// Build the application routes.
///
/// - `/health` - liveness probe (public)
/// - `/metrics` - Prometheus scrape endpoint (public)
/// - `/api/v1/me` - verified identity of the caller (behind the gate)
pub fn build_routes(
    gate: Arc<AuthGate>,
    metrics_handle: PrometheusHandle,
    request_timeout: Duration,
) -> Router {
    let public_routes = Router::new().route("/health", get(handlers::health_check));

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // route_layer so unmatched paths still 404 instead of 401
    let protected_routes = Router::new()
        .route("/api/v1/me", get(handlers::get_me))
        .route_layer(from_fn_with_state(gate, require_auth));

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    public_routes
        .merge(metrics_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}
