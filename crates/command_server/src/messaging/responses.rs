//! Canned JSON response catalog.
//!
//! The response generator is a pure function from [`Command`] to a fixed
//! payload: no side effects, no failure mode. The payload bodies are part of
//! the external interface and must not be reformatted.

use crate::messaging::types::Command;

/// Reply for command A
pub const COMMAND_A_RESPONSE: &str =
    r#"{"data":{"id":1,"firstName":"Kyle","lastName":"Pereira"}}"#;

/// Reply for command B
pub const COMMAND_B_RESPONSE: &str =
    r#"{"data":{"id":2,"firstName":"Kyle","lastName":"Pereira"}}"#;

/// Reply for command C
pub const COMMAND_C_RESPONSE: &str =
    r#"{"data":{"id":3,"firstName":"Kyle","lastName":"Pereira"}}"#;

/// Reply for any message that does not resolve to a command
pub const UNKNOWN_RESPONSE: &str =
    r#"{"statusCode":404,"error":"Not Found","message":"Invalid Request","request":"Return Command"}"#;

/// Body of the HTTP 400 response sent for non-upgrade requests
pub const BAD_REQUEST_BODY: &str =
    r#"{"statusCode":400,"error":"Bad Request","message":"Invalid WebSocket Request"}"#;

/// Returns the canned reply for a resolved command.
pub fn response_for(command: Command) -> &'static str {
    match command {
        Command::A => COMMAND_A_RESPONSE,
        Command::B => COMMAND_B_RESPONSE,
        Command::C => COMMAND_C_RESPONSE,
        Command::Unknown => UNKNOWN_RESPONSE,
    }
}
