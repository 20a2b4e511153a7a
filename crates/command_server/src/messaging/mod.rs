//! Inbound message classification and canned responses.
//!
//! Inbound text frames are parsed once, mapped to a [`Command`], answered
//! from the response catalog, and discarded.

pub mod classifier;
pub mod responses;
pub mod types;

pub use classifier::classify;
pub use responses::response_for;
pub use types::{Command, InboundMessage};
