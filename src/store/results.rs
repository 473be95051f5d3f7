//! Row to dataset-name mapping.

use super::Row;
use std::collections::HashSet;

/// Variable holding the dataset name in compiled queries.
pub const DATASET_NAME_VAR: &str = "datasetName";

/// Collect dataset names from result rows.
///
/// Keeps the first occurrence of each name, in row order. Rows without a
/// `datasetName` binding are skipped. An empty result is a valid answer.
///
/// # Example
///
/// ```
/// use paleo_query::store::{dataset_names, Row, SparqlTerm};
///
/// let rows: Vec<Row> = ["b", "a", "b"]
///     .iter()
///     .map(|n| Row::from([("datasetName".to_string(), SparqlTerm::literal(*n))]))
///     .collect();
/// assert_eq!(dataset_names(&rows), vec!["b", "a"]);
/// ```
pub fn dataset_names(rows: &[Row]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(rows.len());
    let mut names = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(term) = row.get(DATASET_NAME_VAR) else {
            continue;
        };
        if seen.insert(term.value.as_str()) {
            names.push(term.value.clone());
        }
    }
    names
}
