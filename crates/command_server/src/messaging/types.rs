//! Message and command type definitions.

use serde::{Deserialize, Serialize};

/// The closed set of commands a client may request.
///
/// Not user-extensible at runtime: adding a command means adding a variant
/// here and a response mapping in [`crate::messaging::responses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Sentinel for anything that does not resolve to a real command
    Unknown,
    A,
    B,
    C,
}

/// A message sent from a client to the server.
///
/// Only the `request` field participates in dispatch; clients may send
/// additional fields and they are ignored.
///
/// # Example
///
/// ```json
/// {
///   "request": "A"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// The name of the requested command
    pub request: String,
}
