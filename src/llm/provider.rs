//! LLM provider trait and factory.

use super::{AnthropicProvider, OllamaProvider, OpenAiProvider};
use crate::types::{PaleoError, Result};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A text-generation backend.
///
/// Implementations hold their own credentials and model; callers only ever
/// see these two operations.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Check whether the backend can currently be used.
    ///
    /// Never fails: a missing credential or unreachable server is `false`.
    async fn is_available(&self) -> bool;

    /// Generate a completion for a prompt.
    ///
    /// # Arguments
    ///
    /// * `prompt` - Full prompt text
    ///
    /// # Returns
    ///
    /// Raw model output
    ///
    /// # Errors
    ///
    /// Returns `PaleoError::ProviderError` on transport, auth or response failures
    async fn generate_response(&self, prompt: &str) -> Result<String>;
}

/// Built-in provider backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Local Ollama server
    Ollama,
    /// OpenAI chat completions
    OpenAi,
    /// Anthropic messages API
    Claude,
}

impl ProviderKind {
    /// Default fallback order.
    pub const ALL: [ProviderKind; 3] = [Self::Ollama, Self::OpenAi, Self::Claude];

    /// Get provider name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
            Self::Claude => "claude",
        }
    }

    /// Model used when no override is given.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Ollama => "deepseek-r1",
            Self::OpenAi => "gpt-3.5-turbo",
            Self::Claude => "claude-3-opus-20240229",
        }
    }

    /// Environment variable holding the credential (or host for Ollama).
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Ollama => "OLLAMA_HOST",
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Claude => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = PaleoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            "claude" | "anthropic" => Ok(Self::Claude),
            other => Err(PaleoError::ConfigError(format!(
                "unknown provider '{}' (expected ollama, openai or claude)",
                other
            ))),
        }
    }
}

/// Create a provider, reading credentials from the environment.
///
/// This is the only place environment credentials are read, so building a
/// provider is the point where that side effect happens.
///
/// # Arguments
///
/// * `kind` - Backend to create
/// * `model` - Model override (`None` = backend default)
/// * `api_key` - Explicit credential; wins over the environment
///
/// # Returns
///
/// Shared provider handle
pub fn build_provider(
    kind: ProviderKind,
    model: Option<&str>,
    api_key: Option<&str>,
) -> Arc<dyn LlmProvider> {
    let model = model.unwrap_or(kind.default_model()).to_string();
    let from_env = || {
        std::env::var(kind.env_var())
            .ok()
            .filter(|v| !v.trim().is_empty())
    };

    match kind {
        // Ollama has no key; its variable names the host
        ProviderKind::Ollama => Arc::new(OllamaProvider::new(from_env(), model)),
        ProviderKind::OpenAi => {
            let key = api_key.map(str::to_string).or_else(from_env);
            Arc::new(OpenAiProvider::new(key, model))
        }
        ProviderKind::Claude => {
            let key = api_key.map(str::to_string).or_else(from_env);
            Arc::new(AnthropicProvider::new(key, model))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_names() {
        assert_eq!("ollama".parse::<ProviderKind>().unwrap(), ProviderKind::Ollama);
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("anthropic".parse::<ProviderKind>().unwrap(), ProviderKind::Claude);
        assert!("gemini".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_default_models() {
        assert_eq!(ProviderKind::Ollama.default_model(), "deepseek-r1");
        assert_eq!(ProviderKind::OpenAi.default_model(), "gpt-3.5-turbo");
        assert_eq!(ProviderKind::Claude.default_model(), "claude-3-opus-20240229");
    }

    #[tokio::test]
    async fn test_explicit_key_makes_hosted_provider_available() {
        let provider = build_provider(ProviderKind::OpenAi, None, Some("sk-test"));
        assert!(provider.is_available().await);
    }
}
