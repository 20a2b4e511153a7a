//! # Command Server - WebSocket Command Dispatch
//!
//! A minimal WebSocket server: inbound HTTP upgrade requests become
//! persistent bidirectional connections, connected clients are tracked in a
//! shared registry, and inbound text messages are dispatched to a small
//! fixed set of named commands, each answered with a canned JSON response.
//!
//! ## Architecture
//!
//! * **Listener** - accept loop; upgrades WebSocket requests, answers plain
//!   HTTP with a structured 400
//! * **Client Registry** - concurrency-safe map from [`ClientId`] to the
//!   live send handle, injected into every session
//! * **Connection Session** - one task per connection running the
//!   receive/classify/reply loop until close or error
//! * **Command Classifier** - exact, case-sensitive mapping of the
//!   `request` field to a closed command set
//! * **Response Catalog** - pure `Command -> &'static str` payload lookup
//!
//! ## Message Flow
//!
//! 1. Client sends a text frame `{"request":"A"}`
//! 2. The session classifies it against the command table
//! 3. The canned reply for the resolved command is sent back
//! 4. Unrecognized or malformed messages get the 404-shaped reply over the
//!    still-open socket
//!
//! ## Concurrency
//!
//! Sessions never block each other; per-connection message ordering is
//! strict (one message at a time per session) and no ordering exists across
//! connections. The registry is the only shared state and every mutation
//! goes through its insert/remove operations.

// Re-export core types and functions for easy access
pub use config::ServerConfig;
pub use connection::{ClientId, ClientRegistry};
pub use error::ServerError;
pub use messaging::Command;
pub use server::CommandServer;
pub use utils::{create_server, create_server_with_config};

// Public module declarations
pub mod config;
pub mod connection;
pub mod error;
pub mod messaging;
pub mod server;
pub mod utils;


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_server_creation() {
        let server = create_server();
        assert_eq!(server.registry().client_count(), 0);
        assert_eq!(server.config().bind_address.port(), 1234);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_server_with_custom_configuration() {
        let config = ServerConfig {
            bind_address: "127.0.0.1:9999".parse().unwrap(),
        };

        let server = create_server_with_config(config.clone());
        assert_eq!(server.config().bind_address, config.bind_address);

        // Shutdown before start is harmless.
        server.shutdown().await.expect("shutdown should succeed");
    }
}
