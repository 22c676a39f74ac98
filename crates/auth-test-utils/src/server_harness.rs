//! Test server harness for E2E testing.
//!
//! Provides TestAuthServer for spawning real service instances in tests.

use crate::crypto_fixtures::test_key_pair;
use auth_service::crypto::{KeyPair, SigningError, TokenIssuer, TokenVerifier};
use auth_service::middleware::AuthGate;
use auth_service::routes;
use chrono::Duration;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the authentication service in E2E tests.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_me_e2e() -> Result<(), anyhow::Error> {
///     let server = TestAuthServer::spawn().await?;
///     let token = server.issue_token("u-42", "rider", Duration::minutes(15))?;
///
///     let response = reqwest::Client::new()
///         .get(format!("{}/api/v1/me", server.url()))
///         .bearer_auth(token)
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestAuthServer {
    addr: SocketAddr,
    issuer: TokenIssuer,
    handle: JoinHandle<()>,
}

impl TestAuthServer {
    /// Spawn a server that trusts the primary fixture key pair.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_keys(test_key_pair(), 0).await
    }

    /// Spawn a server with the given keys and expiry leeway.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Verify with `keys` and issue test tokens with the same pair
    /// - Start the HTTP server in the background
    pub async fn spawn_with_keys(
        keys: Arc<KeyPair>,
        leeway_seconds: i64,
    ) -> Result<Self, anyhow::Error> {
        let verifier = TokenVerifier::new(keys.clone()).with_leeway(leeway_seconds);
        let gate = Arc::new(AuthGate::new(Arc::new(verifier)));

        // The global recorder can only be installed once per test process.
        // Later servers get a standalone recorder.
        let metrics_handle = match routes::init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => PrometheusBuilder::new().build_recorder().handle(),
        };

        let app = routes::build_routes(gate, metrics_handle, std::time::Duration::from_secs(30));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            issuer: TokenIssuer::new(keys),
            handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Issue a token the server will accept.
    pub fn issue_token(
        &self,
        subject_id: &str,
        role: &str,
        lifetime: Duration,
    ) -> Result<String, SigningError> {
        self.issuer.issue(subject_id, role, lifetime)
    }
}

impl Drop for TestAuthServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
