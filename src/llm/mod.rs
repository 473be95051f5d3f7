//! Language model backends and provider fallback.

pub mod anthropic;
pub mod ollama;
pub mod openai;
pub mod provider;
pub mod registry;

pub use anthropic::AnthropicProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use provider::{build_provider, LlmProvider, ProviderKind};
pub use registry::{Generation, ProviderBuilder, ProviderCandidate, ProviderRegistry};
