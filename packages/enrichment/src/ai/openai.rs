//! OpenAI implementation of the analysis model.
//!
//! A single chat-completions call at low temperature with a fixed
//! max-token budget. The pipeline repairs the response text itself, so no
//! provider-side structured-output mode is required.
//!
//! # Example
//!
//! ```rust,ignore
//! use enrichment::ai::OpenAiModel;
//!
//! let model = OpenAiModel::from_env()?.with_model("gpt-4o-mini");
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::security::SecretString;
use crate::traits::model::AnalysisModel;

/// OpenAI-backed analysis model.
#[derive(Clone)]
pub struct OpenAiModel {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiModel {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::from(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.2,
            max_tokens: 1024,
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> ModelResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ModelError::Service("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the sampling temperature (default: 0.2).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the response token budget (default: 1024).
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl AnalysisModel for OpenAiModel {
    async fn generate(&self, system: &str, user: &str) -> ModelResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Service(Box::new(e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::Service(
                format!("OpenAI API error: {}", error_text).into(),
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Service(Box::new(e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        Ok(content)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_never_leaks_in_debug() {
        let model = OpenAiModel::new("sk-very-secret");
        // SecretString's Debug prints a redaction marker.
        let debug = format!("{:?}", model.api_key);
        assert!(!debug.contains("sk-very-secret"));
    }

    #[test]
    fn builders_apply() {
        let model = OpenAiModel::new("key")
            .with_model("gpt-4o")
            .with_base_url("https://proxy.internal/v1")
            .with_temperature(0.0)
            .with_max_tokens(2048);
        assert_eq!(model.model(), "gpt-4o");
        assert_eq!(model.base_url, "https://proxy.internal/v1");
        assert_eq!(model.temperature, 0.0);
        assert_eq!(model.max_tokens, 2048);
    }
}
