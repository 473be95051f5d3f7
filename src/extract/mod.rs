//! Natural language to parameter extraction.
//!
//! One prompt, one model call, one parse. The extractor never retries the
//! model: an unparseable response is reported to the caller as-is.

pub mod parser;
pub mod prompt;

pub use parser::{clean_response, parse_response};
pub use prompt::build_prompt;

use crate::llm::{Generation, ProviderCandidate, ProviderRegistry};
use crate::schema::{parameter_schema, ParameterSchema};
use crate::types::{ExtractedQuery, PaleoError, Result};

/// Result of one extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Validated parameters
    pub query: ExtractedQuery,
    /// Provider, model and raw text that produced them
    pub generation: Generation,
}

/// Turns requests into `ExtractedQuery` values via a provider chain.
pub struct Extractor {
    schema: &'static ParameterSchema,
    registry: ProviderRegistry,
}

impl Extractor {
    /// Create an extractor over the shared schema.
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            schema: parameter_schema(),
            registry,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Prompt that would be sent for a request.
    pub fn prompt(&self, request: &str) -> String {
        build_prompt(self.schema, request)
    }

    /// Extract parameters from a request.
    ///
    /// # Arguments
    ///
    /// * `request` - User's request text
    /// * `candidates` - Providers to try, in order
    ///
    /// # Errors
    ///
    /// - `ValidationError` for blank requests (no model is called)
    /// - `NoProviderAvailable` when the provider chain is exhausted
    /// - `ExtractionError` when the response is structurally unparseable
    pub async fn extract(&self, request: &str, candidates: &[ProviderCandidate]) -> Result<Extraction> {
        if request.trim().is_empty() {
            return Err(PaleoError::validation("request text is empty"));
        }

        let prompt = self.prompt(request);
        let generation = self.registry.generate(candidates, &prompt).await?;
        tracing::debug!(
            provider = generation.provider.as_str(),
            response = %generation.text,
            "Model response"
        );

        let query = parse_response(self.schema, &generation.text)?;
        Ok(Extraction { query, generation })
    }
}
