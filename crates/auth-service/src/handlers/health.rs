//! Liveness probe.

/// Handler for GET /health
///
/// Always 200 OK while the process can serve HTTP. Key material is loaded
/// before the listener binds, so a running server can always verify tokens.
#[tracing::instrument(skip_all, name = "auth.handlers.health")]
pub async fn health_check() -> &'static str {
    "OK"
}
