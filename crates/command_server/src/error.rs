//! Error types for the command server.

use thiserror::Error;

/// Errors produced by the server core.
///
/// Per-connection failures are contained within their session task and only
/// surface here as logged events; the variants below are what callers of the
/// public API can observe.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Network-level failure: binding, handshaking, or frame transport.
    #[error("Network error: {0}")]
    Network(String),

    /// Internal failure that is not attributable to the transport.
    #[error("Internal error: {0}")]
    Internal(String),
}
