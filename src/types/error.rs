//! Error types for the query pipeline.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` implementations.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Pipeline stage an error originated from.
///
/// Used to build user-facing messages ("extraction failed: ...") and to
/// decide which failures the provider fallback chain may absorb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Caller input validation
    Input,
    /// LLM provider call
    Provider,
    /// Parsing the model response
    Extraction,
    /// Parameter to SPARQL compilation
    Compilation,
    /// Triple store execution
    Store,
    /// Result persistence
    Output,
    /// Settings resolution
    Config,
}

impl Stage {
    /// Get stage name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Provider => "provider",
            Self::Extraction => "extraction",
            Self::Compilation => "compilation",
            Self::Store => "store",
            Self::Output => "output",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a store query failed.
///
/// `Syntax` means the store rejected the query text, which points at a
/// compiler bug rather than an operational problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    /// Endpoint unreachable, TLS/DNS failure, 5xx
    Connectivity,
    /// Store rejected the query (400 / MALFORMED QUERY)
    Syntax,
    /// Response body was not SPARQL JSON results
    Response,
}

impl StoreFailure {
    /// Get failure kind as string (used as a log field).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::Syntax => "syntax",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for all pipeline operations.
#[derive(Error, Debug)]
pub enum PaleoError {
    /// Caller input rejected before any model or store call
    #[error("Invalid input: {0}")]
    ValidationError(String),

    /// Transport/auth failure calling an LLM backend
    #[error("Provider '{provider}' failed: {message}")]
    ProviderError { provider: String, message: String },

    /// Every candidate provider was unavailable or failed
    #[error("No LLM provider available ({0})")]
    NoProviderAvailable(String),

    /// Model response had no recognizable structure
    #[error("Extraction failed: {0}")]
    ExtractionError(String),

    /// A parameter could not be turned into a query constraint
    #[error("Query compilation failed: {0}")]
    CompilationError(String),

    /// Triple store execution failed
    #[error("Store {kind} error: {message}")]
    StoreError { kind: StoreFailure, message: String },

    /// A blocking call exceeded the caller-supplied timeout
    #[error("{stage} call timed out after {after:?}")]
    Timeout { stage: Stage, after: Duration },

    /// Settings could not be resolved
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PaleoError {
    /// Create a validation error with context.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a provider error for a named backend.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.into(),
            message: msg.into(),
        }
    }

    /// Create an extraction error with context.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::ExtractionError(msg.into())
    }

    /// Create a compilation error with context.
    pub fn compilation(msg: impl Into<String>) -> Self {
        Self::CompilationError(msg.into())
    }

    /// Create a store error of the given kind.
    pub fn store(kind: StoreFailure, msg: impl Into<String>) -> Self {
        Self::StoreError {
            kind,
            message: msg.into(),
        }
    }

    /// Check if error is recoverable by trying the next provider.
    ///
    /// # Returns
    ///
    /// `true` for provider failures and provider timeouts, `false` otherwise
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ProviderError { .. } => true,
            Self::Timeout { stage, .. } => *stage == Stage::Provider,
            _ => false,
        }
    }

    /// Pipeline stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::ValidationError(_) => Stage::Input,
            Self::ProviderError { .. } | Self::NoProviderAvailable(_) => Stage::Provider,
            Self::ExtractionError(_) => Stage::Extraction,
            Self::CompilationError(_) => Stage::Compilation,
            Self::StoreError { .. } => Stage::Store,
            Self::Timeout { stage, .. } => *stage,
            Self::ConfigError(_) => Stage::Config,
            Self::JsonError(_) | Self::IoError(_) => Stage::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PaleoError::provider("openai", "401 Unauthorized");
        assert_eq!(err.to_string(), "Provider 'openai' failed: 401 Unauthorized");

        let err = PaleoError::store(StoreFailure::Syntax, "MALFORMED QUERY");
        assert_eq!(err.to_string(), "Store syntax error: MALFORMED QUERY");

        let err = PaleoError::Timeout {
            stage: Stage::Store,
            after: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "store call timed out after 5s");
    }

    #[test]
    fn test_recoverable_only_for_provider_failures() {
        assert!(PaleoError::provider("ollama", "connection refused").is_recoverable());
        assert!(PaleoError::Timeout {
            stage: Stage::Provider,
            after: Duration::from_secs(1)
        }
        .is_recoverable());

        assert!(!PaleoError::extraction("no JSON object").is_recoverable());
        assert!(!PaleoError::compilation("unknown period").is_recoverable());
        assert!(!PaleoError::NoProviderAvailable("tried: ollama".into()).is_recoverable());
        assert!(!PaleoError::Timeout {
            stage: Stage::Store,
            after: Duration::from_secs(1)
        }
        .is_recoverable());
    }

    #[test]
    fn test_stage_mapping() {
        assert_eq!(PaleoError::validation("empty").stage(), Stage::Input);
        assert_eq!(PaleoError::extraction("x").stage(), Stage::Extraction);
        assert_eq!(PaleoError::compilation("x").stage(), Stage::Compilation);
        assert_eq!(
            PaleoError::store(StoreFailure::Connectivity, "x").stage(),
            Stage::Store
        );

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(PaleoError::from(io).stage(), Stage::Output);
    }
}
