//! # Storefront API
//!
//! REST server for the storefront checkout slice.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront API Server                            │
//! │                                                                         │
//! │  Browser ───► HTTP (8080) ───► Handlers ───► Razorpay Orders API       │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                          SignatureVerifier                              │
//! │                        (local HMAC check)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No cart or order persistence: cart state lives on the client, orders
//! live at the gateway, and every endpoint is a stateless function of its
//! request plus config.

mod auth;
mod catalog;
mod error;
mod routes;
mod state;

use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use storefront_checkout::{CheckoutConfig, RazorpayClient};

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting storefront API server...");

    // Load configuration
    let config = CheckoutConfig::load()?;
    info!(
        api_base = %config.api_base,
        key_id = %config.key_id.chars().take(8).collect::<String>(),
        "Configuration loaded"
    );

    let jwt_secret = std::env::var("STOREFRONT_JWT_SECRET")
        .map(|v| v.trim().to_string())
        .unwrap_or_default();
    if jwt_secret.is_empty() {
        return Err("STOREFRONT_JWT_SECRET must be set".into());
    }

    let port: u16 = std::env::var("STOREFRONT_API_PORT")
        .ok()
        .map(|v| v.parse())
        .transpose()?
        .unwrap_or(8080);

    // Build gateway client and shared state
    let gateway = RazorpayClient::new(&config)?;
    let state = AppState::new(config, gateway, jwt_secret);

    let app = routes::router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
