//! Field specifications and vocabulary matching.

use serde::Serialize;

/// Semantic type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-ish string resolved against a vocabulary
    Text,
    /// Exactly one value from a closed set
    Enumerated,
    /// Zero or more values from a closed set
    List,
}

/// How raw values are matched against a field's vocabulary.
///
/// Fixed per field; callers cannot choose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Normalized equality with the canonical name or an alias
    Exact,
    /// Exact first, then case-insensitive substring in either direction
    Substring,
}

/// One vocabulary entry: canonical ontology name plus accepted aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

impl Term {
    pub const fn new(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { canonical, aliases }
    }
}

/// Ordered set of terms a field accepts.
///
/// Order matters for substring matching: the first matching term wins.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<Term>,
}

impl Vocabulary {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Canonical names in table order.
    pub fn canonical_names(&self) -> Vec<&'static str> {
        self.terms.iter().map(|t| t.canonical).collect()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Resolve a raw value to its canonical name.
    ///
    /// # Arguments
    ///
    /// * `raw` - Value as written by the model or the user
    /// * `mode` - Field match mode
    ///
    /// # Returns
    ///
    /// Canonical name, or `None` if the value is not in the vocabulary
    pub fn resolve(&self, raw: &str, mode: MatchMode) -> Option<&'static str> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }

        let exact = self.terms.iter().find(|t| {
            normalize_key(t.canonical) == key || t.aliases.iter().any(|a| normalize_key(a) == key)
        });
        if let Some(term) = exact {
            return Some(term.canonical);
        }

        match mode {
            MatchMode::Exact => None,
            MatchMode::Substring => {
                // Very short keys would match almost anything
                if key.chars().count() < 3 {
                    return None;
                }
                // A name inside the value wins, longest first ("antarctic" over "arctic")
                let mut best: Option<(usize, &Term)> = None;
                for term in &self.terms {
                    let canonical = normalize_key(term.canonical);
                    if key.contains(&canonical) && best.map_or(true, |(len, _)| canonical.len() > len) {
                        best = Some((canonical.len(), term));
                    }
                }
                if let Some((_, term)) = best {
                    return Some(term.canonical);
                }

                self.terms
                    .iter()
                    .find(|t| normalize_key(t.canonical).contains(&key))
                    .map(|t| t.canonical)
            }
        }
    }
}

/// Specification of one extractable parameter.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name as used in prompts and responses
    pub name: &'static str,

    /// Semantic type
    pub kind: FieldKind,

    /// Vocabulary match mode
    pub match_mode: MatchMode,

    /// One-line description shown to the model
    pub description: &'static str,

    /// Accepted values
    pub vocabulary: Vocabulary,

    /// Value used when the field is absent (`None` = unconstrained)
    pub default: Option<&'static str>,
}

impl FieldSpec {
    /// Resolve a raw value against this field's vocabulary and match mode.
    pub fn resolve(&self, raw: &str) -> Option<&'static str> {
        self.vocabulary.resolve(raw, self.match_mode)
    }

    pub fn is_list(&self) -> bool {
        self.kind == FieldKind::List
    }
}

/// Normalize a value for vocabulary comparison.
///
/// Lowercases and keeps only alphanumeric characters, so "Sr/Ca", "sr_ca"
/// and "SrCa" compare equal, as do "Last Glacial Maximum" and
/// "LastGlacialMaximum".
pub fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
