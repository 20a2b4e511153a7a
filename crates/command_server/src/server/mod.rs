//! Server module containing the listener and per-connection session handling.

pub mod core;
pub mod handlers;

pub use core::CommandServer;
