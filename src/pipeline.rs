//! Request pipeline.
//!
//! ```text
//! text ─► provider chain ─► ExtractedQuery ─► SparqlCompiler ─► TripleStore ─► dataset names
//! ```
//!
//! Each invocation is independent; the only shared state is the read-only
//! schema. Provider calls and the store query are bounded by the configured
//! timeout.

use crate::config::Settings;
use crate::extract::{Extraction, Extractor};
use crate::llm::{ProviderKind, ProviderRegistry};
use crate::query::{CompiledQuery, SparqlCompiler};
use crate::store::{dataset_names, GraphDbStore, TripleStore};
use crate::types::{ExtractedQuery, PaleoError, Result, Stage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Natural language request (`None` when parameters were given directly)
    pub question: Option<String>,
    /// Provider that extracted the parameters
    pub provider: Option<String>,
    pub model: Option<String>,
    pub parameters: ExtractedQuery,
    pub sparql: String,
    /// Matching dataset names, unique, in store order
    pub datasets: Vec<String>,
}

impl QueryReport {
    pub fn count(&self) -> usize {
        self.datasets.len()
    }
}

/// Per-request defaults taken from settings.
#[derive(Debug, Clone, Default)]
struct RequestDefaults {
    provider: Option<ProviderKind>,
    model: Option<String>,
    api_key: Option<String>,
}

/// Natural language dataset search.
pub struct PaleoQuery {
    extractor: Extractor,
    compiler: SparqlCompiler,
    store: Arc<dyn TripleStore>,
    timeout: Option<Duration>,
    defaults: RequestDefaults,
}

impl PaleoQuery {
    /// Create a pipeline from its collaborators.
    pub fn new(registry: ProviderRegistry, store: Arc<dyn TripleStore>) -> Self {
        Self {
            extractor: Extractor::new(registry),
            compiler: SparqlCompiler::new(),
            store,
            timeout: None,
            defaults: RequestDefaults::default(),
        }
    }

    /// Create a pipeline against GraphDB using resolved settings.
    ///
    /// No provider is instantiated (and no credential read) until a request runs.
    pub fn from_settings(settings: &Settings) -> Self {
        let registry = ProviderRegistry::new(settings.priority.clone());
        let store = Arc::new(GraphDbStore::new(&settings.endpoint, &settings.repository));

        let mut pipeline = Self::new(registry, store).with_timeout(settings.timeout);
        pipeline.defaults = RequestDefaults {
            provider: settings.provider,
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        };
        pipeline
    }

    /// Bound provider calls and store queries.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let registry = self.extractor.registry().clone().with_timeout(timeout);
        self.extractor = Extractor::new(registry);
        self.timeout = Some(timeout);
        self
    }

    /// Translate a request and return matching dataset names.
    ///
    /// # Arguments
    ///
    /// * `text` - Natural language request
    /// * `provider_override` - Provider to try first
    /// * `model_override` - Model for that first provider
    ///
    /// # Returns
    ///
    /// Unique dataset names; empty when nothing matches
    ///
    /// # Errors
    ///
    /// - `ValidationError` for blank text (no provider is called)
    /// - `NoProviderAvailable` when every provider is unavailable or fails
    /// - `ExtractionError` when the model response is unparseable (the store is not queried)
    /// - `CompilationError` when a parameter has no query constraint
    /// - `StoreError` / `Timeout` from execution
    pub async fn process_query(
        &self,
        text: &str,
        provider_override: Option<&str>,
        model_override: Option<&str>,
    ) -> Result<Vec<String>> {
        self.run(text, provider_override, model_override)
            .await
            .map(|report| report.datasets)
    }

    /// Like `process_query`, returning the full report.
    pub async fn run(
        &self,
        text: &str,
        provider_override: Option<&str>,
        model_override: Option<&str>,
    ) -> Result<QueryReport> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("request", request_id = %request_id);

        async {
            let extraction = self.extract(text, provider_override, model_override).await?;
            let compiled = self.compile(&extraction.query)?;
            let datasets = self.execute(&compiled).await?;

            Ok::<_, PaleoError>(QueryReport {
                request_id,
                generated_at: Utc::now(),
                question: Some(text.trim().to_string()),
                provider: Some(extraction.generation.provider.as_str().to_string()),
                model: Some(extraction.generation.model),
                parameters: extraction.query,
                sparql: compiled.into_text(),
                datasets,
            })
        }
        .instrument(span)
        .await
    }

    /// Run already-known parameters, skipping the model.
    pub async fn run_parameters(&self, params: ExtractedQuery) -> Result<QueryReport> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("request", request_id = %request_id);

        async {
            let compiled = self.compile(&params)?;
            let datasets = self.execute(&compiled).await?;

            Ok::<_, PaleoError>(QueryReport {
                request_id,
                generated_at: Utc::now(),
                question: None,
                provider: None,
                model: None,
                parameters: params,
                sparql: compiled.into_text(),
                datasets,
            })
        }
        .instrument(span)
        .await
    }

    /// Extract parameters from a request.
    ///
    /// Explicit overrides win over the configured defaults. An unknown
    /// provider name is logged and the priority order is used instead.
    pub async fn extract(
        &self,
        text: &str,
        provider_override: Option<&str>,
        model_override: Option<&str>,
    ) -> Result<Extraction> {
        if text.trim().is_empty() {
            return Err(PaleoError::validation("request text is empty"));
        }

        let requested = match provider_override {
            Some(name) => match name.parse::<ProviderKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    tracing::warn!(provider = name, error = %e, "Ignoring unknown provider");
                    None
                }
            },
            None => self.defaults.provider,
        };
        let model = model_override.or(self.defaults.model.as_deref());

        let candidates = self
            .extractor
            .registry()
            .candidates(requested, model, self.defaults.api_key.as_deref());

        let started = Instant::now();
        let extraction = self.extractor.extract(text, &candidates).await?;
        tracing::info!(
            provider = extraction.generation.provider.as_str(),
            fields = ?extraction.query.populated_fields(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Extracted parameters"
        );
        Ok(extraction)
    }

    /// Compile parameters to SPARQL.
    pub fn compile(&self, params: &ExtractedQuery) -> Result<CompiledQuery> {
        let compiled = self.compiler.compile(params)?;
        tracing::debug!(sparql = %compiled.text(), "Compiled query");
        Ok(compiled)
    }

    /// Execute a compiled query and map rows to dataset names.
    pub async fn execute(&self, compiled: &CompiledQuery) -> Result<Vec<String>> {
        let started = Instant::now();
        let call = self.store.execute(compiled.text());
        let rows = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                tracing::error!(after = ?limit, "Store query timed out");
                PaleoError::Timeout {
                    stage: Stage::Store,
                    after: limit,
                }
            })??,
            None => call.await?,
        };

        let names = dataset_names(&rows);
        tracing::info!(
            rows = rows.len(),
            datasets = names.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Store query finished"
        );
        Ok(names)
    }
}
