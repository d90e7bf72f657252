//! Text generation port
//!
//! Defines the interface to whatever produces utterances: a local
//! model server, a hosted chat-completions API, or a scripted stand-in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default sampling temperature for dialog turns.
///
/// Deliberately hot: flat persona prompts produce repetitive small talk
/// at conservative temperatures.
pub const DEFAULT_TEMPERATURE: f32 = 1.2;

/// Errors a text generation backend can surface.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Per-call sampling parameters.
///
/// The engine varies `max_new_tokens` per action (topic introductions
/// get room, greetings and end reflections stay short) while
/// temperature and sampling mode are fixed per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on generated tokens for one call.
    pub max_new_tokens: u32,
    /// Whether to sample; `false` requests greedy decoding.
    pub do_sample: bool,
    /// Sampling temperature; ignored when `do_sample` is off.
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 100,
            do_sample: true,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl GenerationParams {
    /// Returns a copy with a different token budget.
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Returns a copy with a different temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Returns a copy with sampling toggled.
    pub fn with_sampling(mut self, do_sample: bool) -> Self {
        self.do_sample = do_sample;
        self
    }
}

/// Port for generating one utterance from a prompt.
///
/// Implementations live in the infrastructure layer. Generation is a
/// strictly sequential affair for the engine: it awaits each call
/// before composing the next prompt, because every prompt embeds the
/// transcript including the previous reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = GenerationParams::default();
        assert_eq!(params.max_new_tokens, 100);
        assert!(params.do_sample);
        assert_eq!(params.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_with_budget_keeps_other_fields() {
        let params = GenerationParams::default()
            .with_temperature(0.7)
            .with_max_new_tokens(150);
        assert_eq!(params.max_new_tokens, 150);
        assert_eq!(params.temperature, 0.7);
        assert!(params.do_sample);
    }
}
