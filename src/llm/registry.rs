//! Provider selection and fallback.
//!
//! Candidates are tried one at a time in order: the requested provider
//! first (if any), then the rest of the priority list. An unavailable
//! candidate is skipped without calling `generate_response`; a candidate
//! whose call fails or times out is logged and the next one is tried.
//! Only when every candidate is exhausted does the chain fail with
//! `NoProviderAvailable`.

use super::provider::{build_provider, LlmProvider, ProviderKind};
use crate::telemetry::{llm_span, record_outcome, LlmOperation};
use crate::types::{PaleoError, Result, Stage};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Builds a provider for a kind, model override and credential override.
pub type ProviderBuilder =
    Arc<dyn Fn(ProviderKind, Option<&str>, Option<&str>) -> Arc<dyn LlmProvider> + Send + Sync>;

/// A provider instance together with the name it is tried under.
#[derive(Clone)]
pub struct ProviderCandidate {
    pub kind: ProviderKind,
    pub model: String,
    pub provider: Arc<dyn LlmProvider>,
}

impl std::fmt::Debug for ProviderCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCandidate")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .finish()
    }
}

/// Successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Provider that produced the text
    pub provider: ProviderKind,
    /// Model that produced the text
    pub model: String,
    /// Raw model output
    pub text: String,
}

/// Ordered set of providers with a fallback policy.
#[derive(Clone)]
pub struct ProviderRegistry {
    priority: Vec<ProviderKind>,
    builder: ProviderBuilder,
    timeout: Option<Duration>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new(ProviderKind::ALL.to_vec())
    }
}

impl ProviderRegistry {
    /// Create a registry with the given fallback order.
    ///
    /// Duplicate entries keep their first position.
    pub fn new(priority: Vec<ProviderKind>) -> Self {
        let mut ordered = Vec::with_capacity(priority.len());
        for kind in priority {
            if !ordered.contains(&kind) {
                ordered.push(kind);
            }
        }

        Self {
            priority: ordered,
            builder: Arc::new(build_provider),
            timeout: None,
        }
    }

    /// Replace how providers are instantiated.
    pub fn with_builder<F>(mut self, builder: F) -> Self
    where
        F: Fn(ProviderKind, Option<&str>, Option<&str>) -> Arc<dyn LlmProvider> + Send + Sync + 'static,
    {
        self.builder = Arc::new(builder);
        self
    }

    /// Bound each `generate_response` call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn priority(&self) -> &[ProviderKind] {
        &self.priority
    }

    /// Build the candidate list for one request.
    ///
    /// # Arguments
    ///
    /// * `requested` - Provider to try first (`None` = priority order)
    /// * `model` - Model override for the first candidate only
    /// * `api_key` - Credential override for the first candidate only
    ///
    /// # Returns
    ///
    /// Candidates in the order they will be tried
    pub fn candidates(
        &self,
        requested: Option<ProviderKind>,
        model: Option<&str>,
        api_key: Option<&str>,
    ) -> Vec<ProviderCandidate> {
        let mut order: Vec<ProviderKind> = Vec::with_capacity(self.priority.len() + 1);
        if let Some(kind) = requested {
            order.push(kind);
        }
        for kind in &self.priority {
            if !order.contains(kind) {
                order.push(*kind);
            }
        }

        order
            .into_iter()
            .enumerate()
            .map(|(i, kind)| {
                let (model, api_key) = if i == 0 { (model, api_key) } else { (None, None) };
                ProviderCandidate {
                    kind,
                    model: model.unwrap_or(kind.default_model()).to_string(),
                    provider: (self.builder)(kind, model, api_key),
                }
            })
            .collect()
    }

    /// Generate text with the first usable candidate.
    ///
    /// # Errors
    ///
    /// Returns `NoProviderAvailable` when every candidate was unavailable or
    /// failed; non-provider errors from a candidate are returned unchanged
    pub async fn generate(&self, candidates: &[ProviderCandidate], prompt: &str) -> Result<Generation> {
        let mut attempts: Vec<String> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let name = candidate.kind.as_str();

            let available = candidate
                .provider
                .is_available()
                .instrument(llm_span(LlmOperation::Availability, name, &candidate.model))
                .await;
            if !available {
                tracing::info!(provider = name, "Provider unavailable, skipping");
                attempts.push(format!("{}: unavailable", name));
                continue;
            }

            let span = llm_span(LlmOperation::Generate, name, &candidate.model);
            let started = std::time::Instant::now();
            let result = self
                .call(candidate, prompt)
                .instrument(span.clone())
                .await;

            match result {
                Ok(text) => {
                    span.in_scope(|| record_outcome("ok"));
                    tracing::info!(
                        provider = name,
                        model = %candidate.model,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Provider responded"
                    );
                    return Ok(Generation {
                        provider: candidate.kind,
                        model: candidate.model.clone(),
                        text,
                    });
                }
                Err(e) if e.is_recoverable() => {
                    span.in_scope(|| record_outcome("failed"));
                    tracing::warn!(provider = name, error = %e, "Provider failed, trying next");
                    attempts.push(format!("{}: {}", name, e));
                }
                Err(e) => return Err(e),
            }
        }

        let detail = if attempts.is_empty() {
            "no providers configured".to_string()
        } else {
            attempts.join("; ")
        };
        Err(PaleoError::NoProviderAvailable(detail))
    }

    async fn call(&self, candidate: &ProviderCandidate, prompt: &str) -> Result<String> {
        let call = candidate.provider.generate_response(prompt);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(PaleoError::Timeout {
                    stage: Stage::Provider,
                    after: limit,
                })),
            None => call.await,
        }
    }

    /// Check every provider in priority order.
    ///
    /// # Returns
    ///
    /// `(kind, available)` pairs
    pub async fn availability(&self) -> Vec<(ProviderKind, bool)> {
        let mut report = Vec::with_capacity(self.priority.len());
        for candidate in self.candidates(None, None, None) {
            report.push((candidate.kind, candidate.provider.is_available().await));
        }
        report
    }
}
