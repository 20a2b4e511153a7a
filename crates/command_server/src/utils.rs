//! Convenience constructors for the command server.

use crate::{config::ServerConfig, server::CommandServer};

/// Creates a command server with default configuration.
pub fn create_server() -> CommandServer {
    CommandServer::new(ServerConfig::default())
}

/// Creates a command server with the specified configuration.
pub fn create_server_with_config(config: ServerConfig) -> CommandServer {
    CommandServer::new(config)
}
