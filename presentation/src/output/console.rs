//! Console output formatter for finished dialogs

use colloquy_domain::DialogOutcome;

/// Formats a dialog outcome for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Plain dialogue under a header line.
    pub fn format_plain(outcome: &DialogOutcome) -> String {
        format!("\nFinal Dialogue:\n{}", outcome.transcript.to_plain_text())
    }

    /// Markup form of the transcript.
    pub fn format_xml(outcome: &DialogOutcome) -> String {
        outcome.transcript.to_markup()
    }

    /// Full outcome as pretty JSON.
    pub fn format_json(outcome: &DialogOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_domain::{Transcript, Turn};
    use std::collections::BTreeSet;

    fn outcome() -> DialogOutcome {
        let mut transcript = Transcript::new();
        transcript.push(Turn::new("Narrator", "A quiet cafe."));
        transcript.push(Turn::new("Alice", "Hello."));
        DialogOutcome {
            transcript,
            rounds_completed: 1,
            end_signalers: BTreeSet::new(),
        }
    }

    #[test]
    fn test_plain_output_carries_header_and_dialogue() {
        assert_eq!(
            ConsoleFormatter::format_plain(&outcome()),
            "\nFinal Dialogue:\nNarrator: A quiet cafe.\nAlice: Hello."
        );
    }

    #[test]
    fn test_xml_output_is_the_markup_rendering() {
        let xml = ConsoleFormatter::format_xml(&outcome());
        assert!(xml.starts_with("<sp who=\"#Narrator\">"));
        assert!(xml.ends_with("<p>Hello.</p></sp>\n"));
    }

    #[test]
    fn test_json_output_includes_outcome_fields() {
        let json = ConsoleFormatter::format_json(&outcome());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rounds_completed"], 1);
        assert_eq!(value["transcript"][0]["speaker"], "Narrator");
    }
}
