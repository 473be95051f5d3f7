//! Local Ollama client.

use super::provider::LlmProvider;
use crate::types::{PaleoError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Host used when `OLLAMA_HOST` is unset.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Availability check timeout; a local server answers quickly or not at all.
const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(3);

/// Ollama chat response (non-streaming).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Ollama provider.
pub struct OllamaProvider {
    host: String,
    model: String,
    client: Client,
}

impl OllamaProvider {
    /// Create new Ollama provider.
    ///
    /// # Arguments
    ///
    /// * `host` - Server URL (`None` = `http://localhost:11434`)
    /// * `model` - Model name (e.g., "deepseek-r1")
    pub fn new(host: Option<String>, model: String) -> Self {
        let host = host.unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string());
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host
        } else {
            format!("http://{}", host)
        };

        Self {
            host: host.trim_end_matches('/').to_string(),
            model,
            client: Client::new(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn is_available(&self) -> bool {
        let result = self
            .client
            .get(format!("{}/api/tags", self.host))
            .timeout(AVAILABILITY_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::debug!(host = %self.host, status = %response.status(), "Ollama availability check rejected");
                false
            }
            Err(e) => {
                tracing::debug!(host = %self.host, error = %e, "Ollama not reachable");
                false
            }
        }
    }

    async fn generate_response(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/api/chat", self.host))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "stream": false,
                "options": {"temperature": 0.0}
            }))
            .send()
            .await
            .map_err(|e| PaleoError::provider("ollama", format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaleoError::provider("ollama", format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(PaleoError::provider("ollama", format!("HTTP {}: {}", status, body)));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| PaleoError::provider("ollama", format!("unexpected response: {}", e)))?;

        Ok(parsed.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_normalization() {
        let p = OllamaProvider::new(None, "deepseek-r1".into());
        assert_eq!(p.host(), "http://localhost:11434");

        let p = OllamaProvider::new(Some("gpu-box:11434/".into()), "llama3".into());
        assert_eq!(p.host(), "http://gpu-box:11434");
        assert_eq!(p.model(), "llama3");
    }
}
