//! Client connection tracking.
//!
//! This module defines client identifiers and the shared registry that maps
//! them to live WebSocket send handles for the duration of a connection.

pub mod registry;

pub use registry::{ClientHandle, ClientRegistry};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connected client.
///
/// Generated at accept time, stable for the connection's lifetime and never
/// reused. Random v4 UUIDs make collisions a non-concern in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
    /// Creates a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
