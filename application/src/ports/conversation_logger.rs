//! Port for structured dialog logging.
//!
//! Defines the [`ConversationLogger`] trait for recording dialog events
//! (scene, greetings, turns, completion) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing carries
//! human-readable diagnostics, while this port captures the dialog
//! itself in a machine-readable format (JSONL).

use colloquy_domain::{ActionKind, SpeakerId};
use serde_json::{Value, json};
use std::collections::BTreeSet;

/// A structured dialog event for logging.
///
/// Events carry a kind tag and a JSON payload; the adapter adds the
/// timestamp when the record is written.
pub struct DialogEvent {
    /// Event kind identifier (e.g. "turn", "scene").
    pub kind: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DialogEvent {
    /// The generated scene description.
    pub fn scene(text: &str) -> Self {
        Self {
            kind: "scene",
            payload: json!({ "text": text }),
        }
    }

    /// One greeting before round one.
    pub fn greeting(speaker: &SpeakerId, text: &str) -> Self {
        Self {
            kind: "greeting",
            payload: json!({ "speaker": speaker, "text": text }),
        }
    }

    /// One spoken discussion turn.
    pub fn turn(round: u32, speaker: &SpeakerId, action: ActionKind, text: &str) -> Self {
        Self {
            kind: "turn",
            payload: json!({
                "round": round,
                "speaker": speaker,
                "action": action,
                "text": text,
            }),
        }
    }

    /// End of the run with its closing state.
    pub fn complete(rounds_completed: u32, end_signalers: &BTreeSet<SpeakerId>) -> Self {
        Self {
            kind: "complete",
            payload: json!({
                "rounds_completed": rounds_completed,
                "end_signalers": end_signalers,
            }),
        }
    }
}

/// Port for logging dialog events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL
/// line). The `record` method is intentionally synchronous and
/// non-fallible to avoid disrupting the dialog flow — logging failures
/// are silently ignored.
pub trait ConversationLogger: Send + Sync {
    /// Record a dialog event.
    fn record(&self, event: DialogEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn record(&self, _event: DialogEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_event_payload() {
        let event = DialogEvent::turn(2, &SpeakerId::new("Alice"), ActionKind::Support, "Genau.");
        assert_eq!(event.kind, "turn");
        assert_eq!(event.payload["round"], 2);
        assert_eq!(event.payload["speaker"], "Alice");
        assert_eq!(event.payload["action"], "support");
        assert_eq!(event.payload["text"], "Genau.");
    }

    #[test]
    fn test_complete_event_lists_signalers() {
        let signalers = BTreeSet::from([SpeakerId::new("Eve"), SpeakerId::new("Bob")]);
        let event = DialogEvent::complete(5, &signalers);
        assert_eq!(event.kind, "complete");
        assert_eq!(event.payload["rounds_completed"], 5);
        assert_eq!(event.payload["end_signalers"][0], "Bob");
    }
}
