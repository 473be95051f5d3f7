//! Compiled query value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A SPARQL query ready for execution.
///
/// Immutable once built. `bindings` records the resolved value of every
/// constraint that went into the text (canonical names, interval, region),
/// keyed by field name, so plans and reports can show what was queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledQuery {
    text: String,
    bindings: BTreeMap<String, String>,
}

impl CompiledQuery {
    pub(crate) fn new(text: String, bindings: BTreeMap<String, String>) -> Self {
        Self { text, bindings }
    }

    /// Full query text, prefixes included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Resolved constraint values by field name.
    pub fn bindings(&self) -> &BTreeMap<String, String> {
        &self.bindings
    }

    /// `true` when the query only selects dataset names.
    pub fn is_unfiltered(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
