//! Anthropic messages API client.

use super::provider::LlmProvider;
use crate::types::{PaleoError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Anthropic API response.
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: String,
}

/// Claude provider.
pub struct AnthropicProvider {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl AnthropicProvider {
    /// Create new Anthropic provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key; without one the provider reports unavailable
    /// * `model` - Model name (e.g., "claude-3-opus-20240229")
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_response(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PaleoError::provider("claude", "ANTHROPIC_API_KEY not set"))?;

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.model,
                "max_tokens": MAX_TOKENS,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "temperature": 0.0
            }))
            .send()
            .await
            .map_err(|e| PaleoError::provider("claude", format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaleoError::provider("claude", format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(PaleoError::provider("claude", format!("HTTP {}: {}", status, body)));
        }

        let parsed: AnthropicResponse = serde_json::from_str(&body)
            .map_err(|e| PaleoError::provider("claude", format!("unexpected response: {}", e)))?;

        let text: String = parsed.content.into_iter().map(|c| c.text).collect();
        if text.trim().is_empty() {
            return Err(PaleoError::provider("claude", "response had no text content"));
        }
        Ok(text)
    }
}
