//! OpenAI chat completions client.

use super::provider::LlmProvider;
use crate::types::{PaleoError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI API response.
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

/// OpenAI provider.
pub struct OpenAiProvider {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    /// Create new OpenAI provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key; without one the provider reports unavailable
    /// * `model` - Model name (e.g., "gpt-3.5-turbo")
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Point the client at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_response(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PaleoError::provider("openai", "OPENAI_API_KEY not set"))?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "temperature": 0.0
            }))
            .send()
            .await
            .map_err(|e| PaleoError::provider("openai", format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaleoError::provider("openai", format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(PaleoError::provider("openai", format!("HTTP {}: {}", status, body)));
        }

        let parsed: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| PaleoError::provider("openai", format!("unexpected response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| PaleoError::provider("openai", "response had no content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_without_key() {
        let p = OpenAiProvider::new(None, "gpt-3.5-turbo".into());
        assert!(!p.is_available().await);
        let err = p.generate_response("hi").await.unwrap_err();
        assert!(err.is_recoverable());
    }
}
