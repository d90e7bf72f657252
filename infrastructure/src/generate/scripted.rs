//! Offline text generator
//!
//! Cycles through a fixed list of lines, ignoring the prompt. Useful
//! for dry runs and demos without an inference endpoint; the stock
//! lines include a question and an end signal so a cycled run still
//! exercises the full topic lifecycle.

use async_trait::async_trait;
use colloquy_application::ports::text_generator::{
    GenerationError, GenerationParams, TextGenerator,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Text generator that replays canned lines in order, wrapping around.
pub struct ScriptedTextGenerator {
    lines: Vec<String>,
    cursor: AtomicUsize,
}

impl ScriptedTextGenerator {
    /// Create from the given lines; an empty list falls back to the
    /// stock lines.
    pub fn new(lines: impl IntoIterator<Item = String>) -> Self {
        let lines: Vec<String> = lines.into_iter().collect();
        let lines = if lines.is_empty() {
            Self::stock_lines()
        } else {
            lines
        };
        Self {
            lines,
            cursor: AtomicUsize::new(0),
        }
    }

    fn stock_lines() -> Vec<String> {
        [
            "Das ist ein spannender Gedanke.",
            "Da stimme ich dir zu.",
            "Wie seht ihr das?",
            "Lass uns das genauer betrachten.",
            "Vielleicht sollten wir langsam zum Schluss kommen.",
        ]
        .map(str::to_string)
        .to_vec()
    }
}

impl Default for ScriptedTextGenerator {
    fn default() -> Self {
        Self::new([])
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.lines.len();
        Ok(self.lines[idx].clone())
    }
}
