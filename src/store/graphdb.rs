//! GraphDB SPARQL endpoint client.

use super::{Row, TripleStore};
use crate::telemetry::{record_returned_rows, store_span};
use crate::types::{PaleoError, Result, StoreFailure};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::Instrument;

const RESULTS_JSON: &str = "application/sparql-results+json";

/// SPARQL 1.1 JSON results document.
#[derive(Debug, Deserialize)]
struct SparqlResults {
    results: SparqlBindings,
}

#[derive(Debug, Deserialize)]
struct SparqlBindings {
    bindings: Vec<Row>,
}

/// ASK response.
#[derive(Debug, Deserialize)]
struct AskResult {
    boolean: bool,
}

/// Client for one GraphDB repository.
#[derive(Debug, Clone)]
pub struct GraphDbStore {
    endpoint: String,
    repository: String,
    client: Client,
}

impl GraphDbStore {
    /// Create a client.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Server root (e.g., "https://linkedearth.graphdb.mint.isi.edu")
    /// * `repository` - Repository name (e.g., "LiPDVerse-dynamic")
    pub fn new(endpoint: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            repository: repository.into(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// SPARQL endpoint URL of the repository.
    pub fn query_url(&self) -> String {
        format!("{}/repositories/{}", self.endpoint, self.repository)
    }

    /// Check that the repository answers queries.
    ///
    /// # Errors
    ///
    /// Same classification as `execute`
    pub async fn ping(&self) -> Result<bool> {
        let body = self.post("ASK { ?s ?p ?o }").await?;
        let parsed: AskResult = serde_json::from_str(&body).map_err(|e| {
            PaleoError::store(StoreFailure::Response, format!("unexpected ASK response: {}", e))
        })?;
        Ok(parsed.boolean)
    }

    async fn post(&self, query: &str) -> Result<String> {
        let response = self
            .client
            .post(self.query_url())
            .header("Accept", RESULTS_JSON)
            .form(&[("query", query)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(failure = "connectivity", endpoint = %self.endpoint, error = %e, "Store unreachable");
                PaleoError::store(StoreFailure::Connectivity, e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PaleoError::store(StoreFailure::Connectivity, format!("failed to read response: {}", e))
        })?;

        if status.is_success() {
            return Ok(body);
        }

        let kind = classify(status);
        match kind {
            StoreFailure::Syntax => tracing::error!(
                failure = "syntax",
                status = %status,
                body = %body,
                "Store rejected the generated query; the compiler produced invalid SPARQL"
            ),
            _ => tracing::error!(
                failure = kind.as_str(),
                status = %status,
                endpoint = %self.endpoint,
                "Store request failed"
            ),
        }
        Err(PaleoError::store(kind, format!("HTTP {}: {}", status, body.trim())))
    }
}

/// Map a non-success status to a failure kind.
fn classify(status: StatusCode) -> StoreFailure {
    match status {
        StatusCode::BAD_REQUEST => StoreFailure::Syntax,
        _ => StoreFailure::Connectivity,
    }
}

#[async_trait]
impl TripleStore for GraphDbStore {
    async fn execute(&self, query: &str) -> Result<Vec<Row>> {
        let span = store_span(&self.endpoint, &self.repository, query);
        async {
            let body = self.post(query).await?;
            let parsed: SparqlResults = serde_json::from_str(&body).map_err(|e| {
                tracing::error!(failure = "response", error = %e, "Unreadable SPARQL results");
                PaleoError::store(StoreFailure::Response, format!("invalid SPARQL JSON results: {}", e))
            })?;
            record_returned_rows(parsed.results.bindings.len());
            Ok::<_, PaleoError>(parsed.results.bindings)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url() {
        let store = GraphDbStore::new("https://linkedearth.graphdb.mint.isi.edu/", "LiPDVerse-dynamic");
        assert_eq!(
            store.query_url(),
            "https://linkedearth.graphdb.mint.isi.edu/repositories/LiPDVerse-dynamic"
        );
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(classify(StatusCode::BAD_REQUEST), StoreFailure::Syntax);
        assert_eq!(classify(StatusCode::INTERNAL_SERVER_ERROR), StoreFailure::Connectivity);
        assert_eq!(classify(StatusCode::SERVICE_UNAVAILABLE), StoreFailure::Connectivity);
        assert_eq!(classify(StatusCode::NOT_FOUND), StoreFailure::Connectivity);
    }
}
