//! Per-connection session handling.
//!
//! One task per accepted connection: filter out plain HTTP requests, perform
//! the WebSocket handshake, register the client, then run the receive loop
//! until the peer closes or the transport fails. The registry entry lives
//! exactly as long as the session.

use crate::{
    connection::{ClientHandle, ClientId, ClientRegistry},
    error::ServerError,
    messaging::{classifier, responses},
};
use futures::StreamExt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

/// Upper bound on the HTTP request head inspected for upgrade detection.
const REQUEST_HEAD_LIMIT: usize = 4096;

/// How long a peer gets to deliver its complete request head.
const REQUEST_HEAD_TIMEOUT: Duration = Duration::from_secs(5);

/// What the peeked request head turned out to be.
#[derive(Debug, PartialEq, Eq)]
enum RequestKind {
    /// A WebSocket upgrade request.
    Upgrade,
    /// A complete HTTP request without an upgrade header.
    PlainHttp,
    /// The peer never delivered a complete request head.
    Incomplete,
}

/// Handles one accepted TCP connection for its full lifetime.
///
/// Non-upgrade requests are answered with the canned HTTP 400 and never
/// registered. For upgrades, a fresh [`ClientId`] is registered after the
/// handshake and removed again on every exit path: peer close, transport
/// error, or server shutdown.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    registry: Arc<ClientRegistry>,
) -> Result<(), ServerError> {
    match classify_request(&stream).await? {
        RequestKind::Upgrade => {}
        RequestKind::PlainHttp => {
            reject_plain_http(stream, addr).await;
            return Ok(());
        }
        RequestKind::Incomplete => {
            debug!("Dropping connection from {} with incomplete request head", addr);
            return Ok(());
        }
    }

    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            return Err(ServerError::Network(format!(
                "WebSocket handshake failed for {}: {}",
                addr, e
            )));
        }
    };

    let (ws_sink, mut ws_receiver) = ws_stream.split();
    let client_id = ClientId::new();
    registry.insert(client_id, ClientHandle::new(ws_sink, addr));
    info!("Client {} connected from {}", client_id, addr);

    while let Some(message) = ws_receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                dispatch_message(text.as_str(), client_id, &registry).await;
            }
            Ok(Message::Binary(data)) => {
                // Binary frames are folded into the text path as lossy UTF-8.
                // Documented limitation: callers must not rely on this for
                // actual binary payloads.
                let text = String::from_utf8_lossy(&data).into_owned();
                dispatch_message(&text, client_id, &registry).await;
            }
            Ok(Message::Close(_)) => {
                info!("Client {} requested close", client_id);
                if let Err(e) = registry.send_close(client_id, "Closed by client").await {
                    warn!("Close handshake with client {} did not complete: {}", client_id, e);
                }
                break;
            }
            Ok(Message::Ping(data)) => {
                registry.send_pong(client_id, data).await;
            }
            Ok(Message::Pong(_)) => {
                // Pong received, connection is alive
            }
            Ok(_) => {
                warn!("Unsupported frame type from client {}", client_id);
            }
            Err(e) => {
                error!("WebSocket error for client {}: {}", client_id, e);
                break;
            }
        }
    }

    if let Some(handle) = registry.remove(client_id) {
        let uptime = handle.connected_at.elapsed().unwrap_or_default();
        info!(
            "Client {} from {} disconnected after {:?}",
            client_id, handle.remote_addr, uptime
        );
    }
    Ok(())
}

/// Classifies one inbound message and sends the canned reply.
///
/// A failed send is logged and non-fatal: the session keeps reading, and a
/// dead transport surfaces on the next receive.
async fn dispatch_message(text: &str, client_id: ClientId, registry: &ClientRegistry) {
    debug!("Received from client {}: {}", client_id, text);

    let command = classifier::classify(text);
    let reply = responses::response_for(command);

    if let Err(e) = registry.send_text(client_id, reply).await {
        warn!("Failed to send {:?} reply to client {}: {}", command, client_id, e);
    }
}

/// Peeks at the HTTP request head and classifies the connection.
///
/// The handshake consumes the stream on failure, so plain HTTP requests have
/// to be detected before `accept_async` ever sees them. Peeking leaves the
/// bytes in place for the real handshake. The wait for a complete head is
/// bounded by [`REQUEST_HEAD_TIMEOUT`] so a fragmented upgrade request is
/// never misread as plain HTTP; a head that never completes is reported as
/// [`RequestKind::Incomplete`] and gets no response at all.
async fn classify_request(stream: &TcpStream) -> Result<RequestKind, ServerError> {
    match tokio::time::timeout(REQUEST_HEAD_TIMEOUT, peek_request_head(stream)).await {
        Ok(kind) => kind,
        Err(_) => Ok(RequestKind::Incomplete),
    }
}

async fn peek_request_head(stream: &TcpStream) -> Result<RequestKind, ServerError> {
    let mut buf = [0u8; REQUEST_HEAD_LIMIT];

    loop {
        let n = stream
            .peek(&mut buf)
            .await
            .map_err(|e| ServerError::Network(format!("Failed to peek request head: {}", e)))?;

        if n == 0 {
            // Peer went away before sending a request.
            return Ok(RequestKind::Incomplete);
        }

        let head = &buf[..n];
        if head.windows(4).any(|w| w == b"\r\n\r\n") || n == buf.len() {
            let head = String::from_utf8_lossy(head).to_ascii_lowercase();
            return Ok(if head_has_upgrade(&head) {
                RequestKind::Upgrade
            } else {
                RequestKind::PlainHttp
            });
        }

        // Peek does not consume, so readiness alone cannot signal new bytes.
        // Poll again shortly; the overall wait is bounded by the caller.
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Scans a lowercased request head for an `Upgrade: websocket` header.
fn head_has_upgrade(head: &str) -> bool {
    head.lines().any(|line| match line.split_once(':') {
        Some((name, value)) => name.trim() == "upgrade" && value.contains("websocket"),
        None => false,
    })
}

/// Answers a non-upgrade HTTP request with the canned 400 and closes.
async fn reject_plain_http(mut stream: TcpStream, addr: SocketAddr) {
    let body = responses::BAD_REQUEST_BODY;
    let response = format!(
        "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );

    if let Err(e) = stream.write_all(response.as_bytes()).await {
        warn!("Failed to write 400 response to {}: {}", addr, e);
    }
    let _ = stream.shutdown().await;

    info!("Rejected non-WebSocket request from {}", addr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_has_upgrade_detects_header() {
        let head = "get / http/1.1\r\nhost: localhost\r\nupgrade: websocket\r\nconnection: upgrade\r\n\r\n";
        assert!(head_has_upgrade(head));
    }

    #[test]
    fn test_head_without_upgrade_is_plain() {
        let head = "get / http/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n";
        assert!(!head_has_upgrade(head));
    }

    #[test]
    fn test_upgrade_must_be_a_header_name() {
        // "upgrade" appearing in some other header's value is not an upgrade.
        let head = "get / http/1.1\r\nx-note: please upgrade: websocket later\r\n\r\n";
        assert!(!head_has_upgrade(head));
    }
}
