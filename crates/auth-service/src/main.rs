//! Wasselli Authentication Service
//!
//! Loads the RSA key pair, then serves the authentication-gated API until
//! SIGINT or SIGTERM.

use auth_service::config::Config;
use auth_service::crypto::{KeyPair, TokenVerifier};
use auth_service::middleware::AuthGate;
use auth_service::routes;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Wasselli Authentication Service");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        bind_address = %config.bind_address,
        jwt_expiry_leeway_seconds = config.jwt_expiry_leeway_seconds,
        request_timeout_seconds = config.request_timeout_seconds,
        "Configuration loaded successfully"
    );

    let metrics_handle = routes::init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics: {}", e);
        e
    })?;

    // Without keys the service cannot verify anything, so this is fatal.
    let keys = Arc::new(KeyPair::load(
        &config.private_key_path,
        &config.public_key_path,
    )?);

    let verifier = TokenVerifier::new(keys).with_leeway(config.jwt_expiry_leeway_seconds);
    let gate = Arc::new(AuthGate::new(Arc::new(verifier)));

    let app = routes::build_routes(gate, metrics_handle, config.request_timeout());

    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Authentication service listening on {}", addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            // Server stopped without a shutdown signal.
            result??;
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    let _ = shutdown_tx.send(());

    match tokio::time::timeout(config.shutdown_timeout(), server).await {
        Ok(result) => result??,
        Err(_) => warn!(
            timeout_seconds = config.shutdown_timeout_seconds,
            "In-flight requests did not finish before the shutdown timeout"
        ),
    }

    info!("Authentication service shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
