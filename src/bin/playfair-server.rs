// Playfair handshake server
//
// Configuration comes from the environment:
//   PLAYFAIR_HOST, PLAYFAIR_PORT           bind address (default 127.0.0.1:5100)
//   PLAYFAIR_KEY, PLAYFAIR_HMAC_KEY        handshake secrets
//   PLAYFAIR_USER_AGENT                    expected client User-Agent
//   RUST_LOG                               log filter
//
// Usage:
//   cargo run --bin playfair-server

use playfair::{HandshakeServer, ServerConfig, Result};
use log::{error, info};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = ServerConfig::from_env()?;

    info!("Starting handshake server on {}", config.addr());
    info!("Configuration:");
    info!("  - Shared key: {} bytes", config.secrets.shared_key().len());

    let server = Arc::new(HandshakeServer::new(config));
    info!("  - Response length: {} characters", server.validator().response_len());

    // Setup graceful shutdown
    let server_clone = server.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, shutting down server...");
                server_clone.shutdown();
            }
            Err(err) => {
                error!("Error setting up signal handler: {}", err);
            }
        }
    });

    info!("Press Ctrl+C to stop");
    server.listen().await?;

    Ok(())
}
