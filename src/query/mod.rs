//! SPARQL compilation for the LinkedEarth ontology.
//!
//! Turns a validated `ExtractedQuery` into a query over
//! dataset → archive → variable → interpretation → resolution → time → location.

pub mod compiled;
pub mod compiler;
pub mod namespace;
pub mod temporal;

pub use compiled::CompiledQuery;
pub use compiler::SparqlCompiler;
pub use temporal::{AgeUnit, TimeInterval};
