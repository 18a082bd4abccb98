//! room-relay server entry point.
//!
//! Starts the Axum HTTP server with the WebSocket relay and static files.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use room_relay::api;
use room_relay::config::{LogFormat, RelayConfig};
use room_relay::domain::RoomRegistry;
use room_relay::service::RelayService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = RelayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
    tracing::info!(
        addr = %config.listen_addr,
        static_dir = %config.static_dir.display(),
        ws_path = config.ws_path.as_deref().unwrap_or("*"),
        "starting room-relay"
    );

    // Build domain and service layers
    let registry = Arc::new(RoomRegistry::new());
    let relay_service = RelayService::new(registry).with_welcome(config.welcome_message.clone());
    let app = api::build_router(&config, relay_service);

    // Start server
    let listener = api::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    api::serve(listener, app, shutdown_signal()).await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
