//! Shared client registry.
//!
//! Maps [`ClientId`]s to live WebSocket send handles. Entries are inserted
//! exactly once on a successful upgrade and removed exactly once when the
//! session ends; removal is idempotent so the close path and the error path
//! can race without consequence.

use crate::connection::ClientId;
use crate::error::ServerError;
use dashmap::DashMap;
use futures::stream::SplitSink;
use futures::SinkExt;
use std::net::SocketAddr;
use std::time::SystemTime;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{Bytes, Error as WsError, Message};
use tokio_tungstenite::WebSocketStream;

/// Type alias for the server-side WebSocket stream
pub type WsStream = WebSocketStream<TcpStream>;
/// Type alias for the WebSocket send half stored in the registry
pub type WsSink = SplitSink<WsStream, Message>;

/// The live handle for one connected client.
///
/// Holds the send half of the split WebSocket stream plus connection
/// metadata. The receive half stays with the session task that owns the
/// connection's lifecycle.
pub struct ClientHandle {
    sink: WsSink,

    /// The remote network address of the client
    pub remote_addr: SocketAddr,

    /// When this connection was established
    pub connected_at: SystemTime,
}

impl ClientHandle {
    pub fn new(sink: WsSink, remote_addr: SocketAddr) -> Self {
        Self {
            sink,
            remote_addr,
            connected_at: SystemTime::now(),
        }
    }
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("remote_addr", &self.remote_addr)
            .field("connected_at", &self.connected_at)
            .finish()
    }
}

/// Concurrency-safe mapping from client identifier to live connection handle.
///
/// The registry is the only state shared across session tasks. It is injected
/// as an `Arc` into the server and every session rather than living in a
/// process-wide static, so tests can run multiple independent servers in one
/// process. Iteration while other tasks mutate the map is well defined, which
/// keeps a future broadcast-by-id operation safe to add.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: DashMap<ClientId, ClientHandle>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Adds a client to the registry.
    ///
    /// Ids are generation-unique, so an existing entry is never displaced in
    /// practice.
    pub fn insert(&self, id: ClientId, handle: ClientHandle) {
        self.clients.insert(id, handle);
    }

    /// Removes a client from the registry, returning its handle.
    ///
    /// Removing an id that is already absent is a no-op, not an error.
    pub fn remove(&self, id: ClientId) -> Option<ClientHandle> {
        self.clients.remove(&id).map(|(_, handle)| handle)
    }

    /// Returns whether the given client is currently registered.
    pub fn contains(&self, id: ClientId) -> bool {
        self.clients.contains_key(&id)
    }

    /// Returns the ids of all currently registered clients.
    pub fn client_ids(&self) -> Vec<ClientId> {
        self.clients.iter().map(|entry| *entry.key()).collect()
    }

    /// Get the number of active clients
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Sends one complete text frame to the given client.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Network` if the client is not registered or the
    /// underlying transport rejects the write. Callers treat a failed send as
    /// non-fatal to the session.
    pub async fn send_text(&self, id: ClientId, text: &str) -> Result<(), ServerError> {
        match self.clients.get_mut(&id) {
            Some(mut handle) => handle
                .sink
                .send(Message::Text(text.into()))
                .await
                .map_err(|e| ServerError::Network(format!("Failed to send to client {}: {}", id, e))),
            None => Err(ServerError::Network(format!("Client {} not found", id))),
        }
    }

    /// Completes the close handshake for the given client.
    ///
    /// Sends a normal-closure frame with the given reason. Once the peer's
    /// own close frame has been processed the transport rejects new frames
    /// and holds a queued reply instead; closing the sink then drives that
    /// reply onto the wire. Either way the peer sees exactly one close frame.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Network` if the client is not registered or the
    /// close frame cannot be written out.
    pub async fn send_close(&self, id: ClientId, reason: &str) -> Result<(), ServerError> {
        let Some(mut handle) = self.clients.get_mut(&id) else {
            return Err(ServerError::Network(format!("Client {} not found", id)));
        };
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: reason.into(),
        };
        match handle.sink.send(Message::Close(Some(frame))).await {
            Ok(()) => Ok(()),
            Err(WsError::Protocol(ProtocolError::SendAfterClosing)) => {
                handle.sink.close().await.map_err(|e| {
                    ServerError::Network(format!(
                        "Failed to complete close handshake for client {}: {}",
                        id, e
                    ))
                })
            }
            Err(e) => Err(ServerError::Network(format!(
                "Failed to send close to client {}: {}",
                id, e
            ))),
        }
    }

    /// Replies to a ping with a pong carrying the same payload.
    pub async fn send_pong(&self, id: ClientId, data: Bytes) {
        if let Some(mut handle) = self.clients.get_mut(&id) {
            let _ = handle.sink.send(Message::Pong(data)).await;
        }
    }

    /// Close all connections gracefully and clear the registry.
    pub async fn shutdown_all(&self) {
        for mut entry in self.clients.iter_mut() {
            let _ = entry.value_mut().sink.send(Message::Close(None)).await;
        }
        self.clients.clear();
    }
}
