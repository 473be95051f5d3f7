//! Span helpers for outbound calls.
//!
//! Span naming follows `{operation} {target}`, e.g. `generate ollama` or
//! `query LiPDVerse-dynamic`, with client-kind attributes so the spans read
//! the same in a log line or a trace viewer.

use tracing::{field, span, Level, Span};

/// Operations against a model backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmOperation {
    /// Availability check
    Availability,
    /// Completion request
    Generate,
}

impl LlmOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Availability => "availability",
            Self::Generate => "generate",
        }
    }
}

/// Create a span for a provider call.
///
/// # Arguments
///
/// * `operation` - Availability check or generate
/// * `provider` - Provider name (e.g., "ollama")
/// * `model` - Model name
///
/// # Example
///
/// ```rust,ignore
/// let span = llm_span(LlmOperation::Generate, "openai", "gpt-3.5-turbo");
/// let text = provider.generate_response(prompt).instrument(span).await?;
/// ```
pub fn llm_span(operation: LlmOperation, provider: &str, model: &str) -> Span {
    span!(
        Level::INFO,
        "llm",
        otel.name = %format!("{} {}", operation.as_str(), provider),
        otel.kind = "client",
        gen_ai.system = provider,
        gen_ai.operation.name = operation.as_str(),
        gen_ai.request.model = model,
        outcome = field::Empty,
    )
}

/// Create a span for a SPARQL request.
///
/// # Arguments
///
/// * `endpoint` - Store base URL
/// * `repository` - Repository name
/// * `query_text` - Query being executed
pub fn store_span(endpoint: &str, repository: &str, query_text: &str) -> Span {
    span!(
        Level::INFO,
        "store.query",
        otel.name = %format!("query {}", repository),
        otel.kind = "client",
        db.system.name = "graphdb",
        db.namespace = repository,
        db.query.text = query_text,
        server.address = endpoint,
        db.response.returned_rows = field::Empty,
    )
}

/// Record the number of rows returned on the current span.
pub fn record_returned_rows(rows: usize) {
    Span::current().record("db.response.returned_rows", rows);
}

/// Record how a provider attempt ended on the current span.
pub fn record_outcome(outcome: &str) {
    Span::current().record("outcome", outcome);
}
