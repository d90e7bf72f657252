//! Chat-completions text generator
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint with a
//! single user message per utterance. Local inference servers
//! (llama.cpp, vLLM, Ollama's compat route) and hosted APIs all speak
//! this shape.

use async_trait::async_trait;
use colloquy_application::ports::text_generator::{
    GenerationError, GenerationParams, TextGenerator,
};
use colloquy_domain::preview;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Text generator backed by an HTTP chat-completions endpoint.
pub struct HttpTextGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpTextGenerator {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
        })
    }

    /// Set a bearer token; local endpoints usually need none.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: params.max_new_tokens,
            temperature: effective_temperature(params),
        };

        debug!(
            "POST {} ({} prompt bytes, {} max tokens)",
            self.endpoint,
            prompt.len(),
            params.max_new_tokens
        );

        let mut call = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let response = call.send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                GenerationError::Connection(e.to_string())
            } else {
                GenerationError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Connection(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::RequestFailed(format!(
                "HTTP {status}: {}",
                preview(&body, 200)
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::MalformedResponse("no choices in response".into()))?;
        Ok(choice.message.content.trim().to_string())
    }
}

/// Greedy decoding is requested by forcing temperature to zero.
fn effective_temperature(params: &GenerationParams) -> f32 {
    if params.do_sample { params.temperature } else { 0.0 }
}

// Chat-completions wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_expected_fields() {
        let request = ChatRequest {
            model: "local".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Say hi.".to_string(),
            }],
            max_tokens: 80,
            temperature: 1.2,
        };
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(value["model"], "local");
        assert_eq!(value["max_tokens"], 80);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Say hi.");
    }

    #[test]
    fn test_response_parses_first_choice() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "  Hallo zusammen. "}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.trim(),
            "Hallo zusammen."
        );
    }

    #[test]
    fn test_greedy_decoding_zeroes_temperature() {
        let sampling = GenerationParams::default();
        assert_eq!(effective_temperature(&sampling), 1.2);
        let greedy = sampling.with_sampling(false);
        assert_eq!(effective_temperature(&greedy), 0.0);
    }
}
