//! PaleoPal query core - natural language to SPARQL for paleoclimate datasets
//!
//! Turns a free-text request ("coral records with d18O covering the Holocene")
//! into a SPARQL query against a LinkedEarth GraphDB repository:
//! - LLM providers behind one capability trait, with ordered fallback
//! - Extraction of a fixed parameter set from the model's answer
//! - Deterministic compilation of those parameters into graph patterns
//! - Execution against the store and mapping to dataset names
//!
//! Can be used as:
//! - Rust library (`PaleoQuery::process_query`)
//! - CLI (`paleo-query ask "..."`)

pub mod types;
pub mod schema;
pub mod llm;
pub mod extract;
pub mod query;
pub mod store;
pub mod config;
pub mod telemetry;
pub mod output;

// High-level pipeline API
pub mod pipeline;

pub use config::{Settings, SettingsOverrides};
pub use pipeline::{PaleoQuery, QueryReport};
pub use query::CompiledQuery;
pub use types::{ExtractedQuery, OverlapMode, PaleoError, Resolution, Result};
