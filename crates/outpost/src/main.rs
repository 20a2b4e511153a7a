//! Outpost - WebSocket Command Server entry point
//!
//! Wires up configuration, logging, and graceful shutdown around the
//! command server core.

use anyhow::Result;
use clap::Parser;
use command_server::{CommandServer, ServerConfig};
use std::time::Instant;
use tracing::{error, info};

mod config;
mod logging;
mod shutdown;

use config::{Args, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let startup_start = Instant::now();

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging system
    logging::setup_logging(&args)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Outpost WebSocket command server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::load_config(&args)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    info!("Configuration loaded from: {}", args.config.display());

    // Create server configuration
    let server_config = create_server_config(&config, &args)?;
    info!("Listen address: {}", server_config.bind_address);

    let server = CommandServer::new(server_config);

    // Setup shutdown handler
    let shutdown_receiver = shutdown::setup_shutdown_handler().await;

    info!("Startup complete in {:.2?}", startup_start.elapsed());

    // Run the server and wait for shutdown
    tokio::select! {
        result = server.start() => {
            match result {
                Ok(_) => info!("Server stopped normally"),
                Err(e) => {
                    error!("Server error: {}", e);
                    return Err(e.into());
                }
            }
        }
        _ = shutdown_receiver => {
            let shutdown_start = Instant::now();
            info!("Shutdown signal received");
            if let Err(e) = server.shutdown().await {
                error!("Error during shutdown: {}", e);
            }
            info!("Server shutdown completed in {:.2?}", shutdown_start.elapsed());
        }
    }

    Ok(())
}

/// Create server configuration from loaded config and CLI arguments
fn create_server_config(config: &Config, args: &Args) -> Result<ServerConfig> {
    let bind_address = args
        .listen
        .as_deref()
        .unwrap_or(&config.server.listen_addr)
        .parse()
        .map_err(|e| anyhow::anyhow!("Failed to parse listen address: {}", e))?;

    Ok(ServerConfig { bind_address })
}
