//! Core command server implementation.
//!
//! Contains the main `CommandServer` struct: listener setup, the accept
//! loop, and shutdown coordination. All per-connection work happens in
//! spawned session tasks (see [`crate::server::handlers`]).

use crate::{
    config::ServerConfig, connection::ClientRegistry, error::ServerError,
    server::handlers::handle_connection,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{error, info};

/// The command server.
///
/// Owns the configuration, the injected client registry, and the shutdown
/// channel. One logical task runs per accepted connection, concurrently with
/// the accept loop and with every other session; the registry is the only
/// state they share.
pub struct CommandServer {
    /// Server configuration settings
    config: ServerConfig,

    /// Registry of live client connections, shared with every session
    registry: Arc<ClientRegistry>,

    /// Channel for coordinating server shutdown
    shutdown_sender: broadcast::Sender<()>,
}

impl CommandServer {
    /// Creates a new command server with the specified configuration.
    pub fn new(config: ServerConfig) -> Self {
        let registry = Arc::new(ClientRegistry::new());
        let (shutdown_sender, _) = broadcast::channel(1);

        Self {
            config,
            registry,
            shutdown_sender,
        }
    }

    /// Gets a handle to the client registry.
    pub fn registry(&self) -> Arc<ClientRegistry> {
        self.registry.clone()
    }

    /// Gets the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Binds the configured address and serves until shutdown.
    ///
    /// # Errors
    ///
    /// Binding failures are unrecoverable and are returned as
    /// `ServerError::Network`; everything after a successful bind is handled
    /// per connection.
    pub async fn start(&self) -> Result<(), ServerError> {
        info!("🚀 Starting command server on {}", self.config.bind_address);

        let listener = TcpListener::bind(self.config.bind_address)
            .await
            .map_err(|e| {
                ServerError::Network(format!("Failed to bind to {}: {}", self.config.bind_address, e))
            })?;

        self.serve(listener).await
    }

    /// Runs the accept loop on an already-bound listener until shutdown.
    ///
    /// Split out from [`CommandServer::start`] so callers (and tests) can
    /// bind port 0 themselves and learn the local address first.
    ///
    /// Each accepted stream is handed to its own session task; a failure
    /// inside one session is logged and never reaches the accept loop.
    /// Transient accept errors are logged and the loop keeps serving.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Network(format!("Listener has no local address: {}", e)))?;
        info!("✅ Listening for WebSocket connections on {}", local_addr);

        let mut shutdown_receiver = self.shutdown_sender.subscribe();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            let registry = self.registry.clone();

                            // Spawn individual connection handler
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, addr, registry).await {
                                    error!("Connection error: {}", e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Failed to accept connection: {}", e);
                        }
                    }
                }
                _ = shutdown_receiver.recv() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!("🧹 Closing {} active client(s)...", self.registry.client_count());
        self.registry.shutdown_all().await;

        info!("Server stopped");
        Ok(())
    }

    /// Initiates server shutdown.
    ///
    /// Signals the accept loop to stop; live clients receive a close frame
    /// before the registry is cleared.
    pub async fn shutdown(&self) -> Result<(), ServerError> {
        info!("🛑 Shutting down server...");
        let _ = self.shutdown_sender.send(());
        Ok(())
    }
}
