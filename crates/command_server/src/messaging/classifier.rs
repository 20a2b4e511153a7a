//! Command classification for inbound text messages.
//!
//! Classification is deliberately exact: case-sensitive, whole-string
//! matching against a finite table, with numeric-looking values rejected.
//! Loosening any of these rules (case folding, partial matches, numeric
//! coercion) is an incompatible change.

use crate::messaging::types::{Command, InboundMessage};
use tracing::debug;

/// The finite string-to-command mapping.
///
/// `Unknown` is intentionally absent: a message requesting the literal
/// string "Unknown" resolves to the sentinel exactly like any other
/// unrecognized value.
const COMMAND_TABLE: &[(&str, Command)] = &[
    ("A", Command::A),
    ("B", Command::B),
    ("C", Command::C),
];

/// Maps a raw text message to a [`Command`].
///
/// The message must be a JSON object with a string-valued `request` field.
/// Malformed JSON, a missing or non-string field, a purely numeric value, or
/// a value outside the command table all yield `Command::Unknown`; none of
/// these cases is an error.
pub fn classify(raw: &str) -> Command {
    let message: InboundMessage = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(e) => {
            debug!("Unclassifiable message: {}", e);
            return Command::Unknown;
        }
    };

    // Numeric-looking strings never name a command.
    if message.request.parse::<i64>().is_ok() {
        return Command::Unknown;
    }

    COMMAND_TABLE
        .iter()
        .find(|(name, _)| *name == message.request)
        .map(|(_, command)| *command)
        .unwrap_or(Command::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_commands_classify_exactly() {
        assert_eq!(classify(r#"{"request":"A"}"#), Command::A);
        assert_eq!(classify(r#"{"request":"B"}"#), Command::B);
        assert_eq!(classify(r#"{"request":"C"}"#), Command::C);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(classify(r#"{"request":"a"}"#), Command::Unknown);
        assert_eq!(classify(r#"{"request":"b"}"#), Command::Unknown);
    }

    #[test]
    fn test_matching_is_whole_string() {
        assert_eq!(classify(r#"{"request":"AB"}"#), Command::Unknown);
        assert_eq!(classify(r#"{"request":"A "}"#), Command::Unknown);
        assert_eq!(classify(r#"{"request":""}"#), Command::Unknown);
    }

    #[test]
    fn test_numeric_strings_are_rejected() {
        assert_eq!(classify(r#"{"request":"1"}"#), Command::Unknown);
        assert_eq!(classify(r#"{"request":"-42"}"#), Command::Unknown);
    }

    #[test]
    fn test_literal_unknown_resolves_to_sentinel() {
        assert_eq!(classify(r#"{"request":"Unknown"}"#), Command::Unknown);
    }

    #[test]
    fn test_missing_or_non_string_request_field() {
        assert_eq!(classify(r#"{}"#), Command::Unknown);
        assert_eq!(classify(r#"{"command":"A"}"#), Command::Unknown);
        assert_eq!(classify(r#"{"request":1}"#), Command::Unknown);
        assert_eq!(classify(r#"{"request":null}"#), Command::Unknown);
    }

    #[test]
    fn test_malformed_json_is_recovered_as_unknown() {
        assert_eq!(classify(r#"{"request":"A""#), Command::Unknown);
        assert_eq!(classify("not json at all"), Command::Unknown);
        assert_eq!(classify(""), Command::Unknown);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let raw = r#"{"request":"A","subrequest":"login","data":{"id":"1"}}"#;
        assert_eq!(classify(raw), Command::A);
    }
}
