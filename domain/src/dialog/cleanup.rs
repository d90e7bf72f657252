//! Reply post-processing.
//!
//! Generated replies arrive with model artifacts: the prompt echoed
//! back, a leading `Name:` label, markdown emphasis, or the actual
//! utterance wrapped in quotes or a code fence. [`clean_reply`]
//! normalizes all of that into the bare utterance that lands in the
//! transcript.

use regex::Regex;
use std::sync::LazyLock;

/// Cleans a raw generated reply against the prompt that produced it.
///
/// Steps, in order:
/// 1. strip the prompt if the reply echoes it as a prefix,
/// 2. strip one leading speaker label (ASCII letters followed by `:`),
/// 3. remove every run of asterisks,
/// 4. trim surrounding whitespace,
/// 5. if a fenced block, a `"…"` span or a `“…”` span remains, return
///    that span (first match, in that preference order) instead of the
///    whole text.
pub fn clean_reply(raw: &str, prompt: &str) -> String {
    static LEADING_LABEL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z]+\s*:\s*").expect("label regex should compile"));
    static ASTERISK_RUNS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\*+").expect("asterisk regex should compile"));
    static FENCED: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"```([^`]+)```").expect("fence regex should compile"));
    static DOUBLE_QUOTED: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("\"([^\"]+)\"").expect("quote regex should compile"));
    static CURLY_QUOTED: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("“([^”]+)”").expect("curly quote regex should compile"));

    let stripped = raw.strip_prefix(prompt).unwrap_or(raw);
    let unlabeled = LEADING_LABEL.replace(stripped, "");
    let unstarred = ASTERISK_RUNS.replace_all(&unlabeled, "");
    let text = unstarred.trim();

    for extractor in [&*FENCED, &*DOUBLE_QUOTED, &*CURLY_QUOTED] {
        if let Some(captures) = extractor.captures(text) {
            return captures[1].trim().to_string();
        }
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reply_passes_through() {
        assert_eq!(clean_reply("Just a sentence.", ""), "Just a sentence.");
    }

    #[test]
    fn test_strips_echoed_prompt_prefix() {
        let prompt = "# task: Greet briefly.\nGreeting:";
        let raw = format!("{prompt} Hello everyone!");
        assert_eq!(clean_reply(&raw, prompt), "Hello everyone!");
    }

    #[test]
    fn test_prompt_is_only_stripped_as_prefix() {
        let cleaned = clean_reply("Hello. Greeting:", "Greeting:");
        assert_eq!(cleaned, "Hello. Greeting:");
    }

    #[test]
    fn test_strips_leading_speaker_label() {
        assert_eq!(clean_reply("Alice: Hello there.", ""), "Hello there.");
        assert_eq!(clean_reply("Bob : hi", ""), "hi");
    }

    #[test]
    fn test_label_must_be_ascii_letters() {
        // Non-ASCII names fall outside the label pattern and stay.
        assert_eq!(clean_reply("Müller: Hallo", ""), "Müller: Hallo");
    }

    #[test]
    fn test_label_only_strips_at_start() {
        assert_eq!(clean_reply("Well, Alice: hi", ""), "Well, Alice: hi");
    }

    #[test]
    fn test_removes_asterisk_runs() {
        assert_eq!(clean_reply("**Bold** and *quiet* words", ""), "Bold and quiet words");
    }

    #[test]
    fn test_fenced_block_is_preferred() {
        let raw = "Sure, here it is: ```Die Antwort ist klar.``` Hope that helps.";
        assert_eq!(clean_reply(raw, ""), "Die Antwort ist klar.");
    }

    #[test]
    fn test_double_quoted_span_is_extracted() {
        let raw = "She replied \"take the left path\" without hesitation.";
        assert_eq!(clean_reply(raw, ""), "take the left path");
    }

    #[test]
    fn test_curly_quoted_span_is_extracted() {
        let raw = "Er sagte “Genau so machen wir das” und nickte.";
        assert_eq!(clean_reply(raw, ""), "Genau so machen wir das");
    }

    #[test]
    fn test_fence_beats_quotes() {
        let raw = "```fenced words``` and \"quoted words\"";
        assert_eq!(clean_reply(raw, ""), "fenced words");
    }

    #[test]
    fn test_unpaired_quote_is_not_extracted() {
        assert_eq!(clean_reply("A \"dangling quote", ""), "A \"dangling quote");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(clean_reply("   padded   ", ""), "padded");
    }

    #[test]
    fn test_empty_reply_stays_empty() {
        assert_eq!(clean_reply("", ""), "");
        assert_eq!(clean_reply("   ", ""), "");
    }

    #[test]
    fn test_label_after_prompt_strip_is_removed() {
        let prompt = "Response:";
        let raw = "Response:Alice: Danke dir.";
        assert_eq!(clean_reply(raw, prompt), "Danke dir.");
    }
}
