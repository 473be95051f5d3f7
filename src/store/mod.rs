//! Triple store access.
//!
//! The pipeline only needs `execute(query) -> rows`. Rows follow the SPARQL
//! 1.1 JSON results format: one binding per selected variable, each a typed
//! RDF term.

pub mod graphdb;
pub mod results;

pub use graphdb::GraphDbStore;
pub use results::dataset_names;

use crate::types::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One RDF term in a result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlTerm {
    /// `uri`, `literal` or `bnode`
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, rename = "xml:lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl SparqlTerm {
    /// Plain literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: "literal".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }
}

/// Variable name to bound term. Unbound variables are absent.
pub type Row = HashMap<String, SparqlTerm>;

/// A SPARQL endpoint.
#[async_trait]
pub trait TripleStore: Send + Sync {
    /// Execute a SELECT query.
    ///
    /// # Arguments
    ///
    /// * `query` - Full query text
    ///
    /// # Returns
    ///
    /// Result rows in store order
    ///
    /// # Errors
    ///
    /// Returns `PaleoError::StoreError` classified as connectivity, syntax
    /// (store rejected the query) or response (unreadable results)
    async fn execute(&self, query: &str) -> Result<Vec<Row>>;
}
