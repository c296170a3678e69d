//! Paygate Service - HTTP API for Stripe payments
//!
//! This is the main entry point for the paygate service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paygate_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paygate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Paygate Service");

    // Stripe credentials are read here, once, for the lifetime of the process
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        stripe_configured = %config.stripe.is_configured(),
        webhook_secret_configured = %config.stripe.webhook_secret.is_some(),
        "Service configuration loaded"
    );

    let listen_addr = config.listen_addr.clone();
    let state = AppState::new(config);
    let app = create_router(state);

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
