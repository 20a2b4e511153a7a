//! Server configuration types and defaults.

use std::net::SocketAddr;

/// Configuration for the command server.
///
/// The listen address is the only external configuration point of the core:
/// there is no admission control, no persisted state, and no per-connection
/// timeout in the current scope.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The socket address to bind the server to
    pub bind_address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:1234"
                .parse()
                .expect("default bind_address literal must parse"),
        }
    }
}
