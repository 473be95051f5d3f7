//! Model response parsing.
//!
//! The model is asked for a single JSON object keyed by field name. Parsing
//! is lenient per field and strict overall:
//! - reasoning blocks (`<think>...</think>`) and markdown fences are removed
//! - the first `{` through the last `}` is parsed as JSON
//! - each field that is missing, null, a "none" token, or outside its
//!   vocabulary becomes absent, with a warning
//! - no JSON object, or an object with none of the schema's field names, is
//!   an `ExtractionError`

use crate::schema::{normalize_key, FieldSpec, ParameterSchema};
use crate::types::{ExtractedQuery, OverlapMode, PaleoError, Resolution, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<think>.*?</think>").expect("think pattern is valid"));

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("object pattern is valid"));

/// Values meaning "not specified".
const NONE_TOKENS: &[&str] = &[
    "", "null", "none", "any", "n/a", "na", "unknown", "unspecified", "all", "not specified",
];

/// Parse a raw model response into validated parameters.
///
/// # Arguments
///
/// * `schema` - Fields and vocabularies to validate against
/// * `raw` - Model output as returned by the provider
///
/// # Errors
///
/// Returns `ExtractionError` if the response contains no JSON object or the
/// object has none of the schema's fields
///
/// # Example
///
/// ```
/// use paleo_query::extract::parse_response;
/// use paleo_query::schema::parameter_schema;
///
/// let q = parse_response(parameter_schema(), r#"{"archive_type": "coral", "location": null}"#).unwrap();
/// assert_eq!(q.archive_type.as_deref(), Some("Coral"));
/// assert!(q.location.is_none());
/// ```
pub fn parse_response(schema: &ParameterSchema, raw: &str) -> Result<ExtractedQuery> {
    let object = extract_object(raw)?;

    let mut fields: Map<String, Value> = Map::new();
    for (key, value) in object {
        let key = normalize_key(&key);
        if let Some(field) = schema
            .fields()
            .iter()
            .find(|f| normalize_key(f.name) == key)
        {
            fields.insert(field.name.to_string(), value);
        }
    }
    if fields.is_empty() {
        return Err(PaleoError::extraction(
            "response object has none of the expected fields",
        ));
    }

    let mut query = ExtractedQuery::new();
    for field in schema.fields() {
        let Some(value) = fields.get(field.name) else {
            continue;
        };
        match field.name {
            "archive_type" => query.archive_type = scalar(field, value).map(str::to_string),
            "variables" => query.variables = list(field, value),
            "interpretations" => query.interpretations = list(field, value),
            "resolution" => {
                query.resolution = scalar(field, value).and_then(|v| v.parse::<Resolution>().ok())
            }
            "time_period" => query.time_period = scalar(field, value).map(str::to_string),
            "location" => query.location = scalar(field, value).map(str::to_string),
            "time_overlap" => {
                query.time_overlap = scalar(field, value)
                    .and_then(|v| v.parse::<OverlapMode>().ok())
                    .unwrap_or_default()
            }
            other => tracing::debug!(field = other, "No extractor for field"),
        }
    }

    tracing::debug!(fields = ?query.populated_fields(), "Parsed model response");
    Ok(query)
}

/// Remove reasoning blocks and markdown fences.
pub fn clean_response(raw: &str) -> String {
    let text = THINK_BLOCK.replace_all(raw, "");
    let text = text.trim();

    if text.starts_with("```") {
        let start = text.find('\n').map(|i| i + 1).unwrap_or(text.len());
        let end = text.rfind("```").filter(|&e| e >= start).unwrap_or(text.len());
        return text[start..end].trim().to_string();
    }

    text.to_string()
}

fn extract_object(raw: &str) -> Result<Map<String, Value>> {
    let cleaned = clean_response(raw);
    let candidate = JSON_OBJECT
        .find(&cleaned)
        .ok_or_else(|| PaleoError::extraction("no JSON object in model response"))?;

    match serde_json::from_str::<Value>(candidate.as_str()) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(PaleoError::extraction("model response is not a JSON object")),
        Err(e) => Err(PaleoError::extraction(format!(
            "model response is not valid JSON: {}",
            e
        ))),
    }
}

fn is_none_token(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    NONE_TOKENS.contains(&lowered.as_str())
}

/// Raw string values of a JSON value; non-strings are ignored.
fn strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s.split(',').map(|p| p.trim().to_string()).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(|s| s.trim().to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Resolve a single-valued field.
///
/// A whole string is tried before its comma-separated parts, so region
/// names containing commas still resolve.
fn scalar(field: &FieldSpec, value: &Value) -> Option<&'static str> {
    let mut raw: Vec<String> = Vec::new();
    if let Value::String(s) = value {
        raw.push(s.trim().to_string());
    }
    raw.extend(strings(value));
    let raw: Vec<String> = raw.into_iter().filter(|v| !is_none_token(v)).collect();
    if raw.is_empty() {
        return None;
    }

    let resolved = raw.iter().find_map(|v| field.resolve(v));
    if resolved.is_none() {
        tracing::warn!(field = field.name, value = ?raw, "Value outside vocabulary, ignoring field");
    }
    resolved
}

/// Resolve a list field, keeping order and dropping unknown or repeated entries.
fn list(field: &FieldSpec, value: &Value) -> Option<Vec<String>> {
    let mut resolved: Vec<String> = Vec::new();
    for raw in strings(value) {
        if is_none_token(&raw) {
            continue;
        }
        match field.resolve(&raw) {
            Some(name) => {
                if !resolved.iter().any(|r| r == name) {
                    resolved.push(name.to_string());
                }
            }
            None => {
                tracing::warn!(field = field.name, value = %raw, "Value outside vocabulary, dropping entry")
            }
        }
    }

    if resolved.is_empty() {
        None
    } else {
        Some(resolved)
    }
}
