//! Append-only dialog transcript.
//!
//! The transcript is the single record of who said what, in order. It
//! feeds three consumers with the same data: prompt assembly (the plain
//! rendering doubles as the dialog block in reply prompts), file export,
//! and the action selector (which only ever looks at the latest turn).

use crate::core::SpeakerId;
use serde::{Deserialize, Serialize};

/// One attributed utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: SpeakerId,
    pub text: String,
}

impl Turn {
    pub fn new(speaker: impl Into<SpeakerId>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    /// Whether the utterance ends in a question mark (ignoring trailing
    /// whitespace). Drives the answer-pressure rule in action selection.
    pub fn is_question(&self) -> bool {
        self.text.trim().ends_with('?')
    }
}

/// Ordered, append-only sequence of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn. Turns are never removed or edited.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Canonical plain rendering: one `speaker: text` line per turn,
    /// newline-separated without a trailing newline. This exact form is
    /// also what reply prompts embed as the dialog so far.
    pub fn to_plain_text(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.speaker, t.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Markup rendering: one `<sp>` element per turn, each on its own
    /// line. Speaker and text are embedded verbatim, without escaping;
    /// the output targets corpus tooling that expects raw utterances.
    pub fn to_markup(&self) -> String {
        self.turns
            .iter()
            .map(|t| {
                format!(
                    "<sp who=\"#{speaker}\"><speaker>{speaker}.</speaker><p>{text}</p></sp>\n",
                    speaker = t.speaker,
                    text = t.text,
                )
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        let mut t = Transcript::new();
        t.push(Turn::new("Narrator", "A quiet cafe."));
        t.push(Turn::new("Alice", "Hello Bob."));
        t.push(Turn::new("Bob", "Hello! Shall we start?"));
        t
    }

    #[test]
    fn test_push_appends_in_order() {
        let t = sample();
        assert_eq!(t.len(), 3);
        assert_eq!(t.turns()[1].speaker.as_str(), "Alice");
        assert_eq!(t.last().unwrap().speaker.as_str(), "Bob");
    }

    #[test]
    fn test_plain_text_rendering() {
        let t = sample();
        assert_eq!(
            t.to_plain_text(),
            "Narrator: A quiet cafe.\nAlice: Hello Bob.\nBob: Hello! Shall we start?"
        );
    }

    #[test]
    fn test_plain_text_of_empty_transcript() {
        assert_eq!(Transcript::new().to_plain_text(), "");
    }

    #[test]
    fn test_markup_rendering() {
        let mut t = Transcript::new();
        t.push(Turn::new("Alice", "Hello."));
        assert_eq!(
            t.to_markup(),
            "<sp who=\"#Alice\"><speaker>Alice.</speaker><p>Hello.</p></sp>\n"
        );
    }

    #[test]
    fn test_markup_embeds_text_verbatim() {
        let mut t = Transcript::new();
        t.push(Turn::new("Bob", "A < B & C"));
        assert!(t.to_markup().contains("<p>A < B & C</p>"));
    }

    #[test]
    fn test_is_question_ignores_trailing_whitespace() {
        assert!(Turn::new("A", "Really?  ").is_question());
        assert!(!Turn::new("A", "Really.").is_question());
        assert!(!Turn::new("A", "").is_question());
    }

    #[test]
    fn test_question_mark_inside_text_does_not_count() {
        assert!(!Turn::new("A", "Why? Because.").is_question());
    }

    #[test]
    fn test_transcript_serializes_as_turn_list() {
        let t = sample();
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["speaker"], "Narrator");
    }
}
