//! Parameter to SPARQL compilation.
//!
//! Every compiled query selects `?datasetName` for `?dataset`, then adds one
//! graph pattern per populated field. Fields combine conjunctively; the
//! values of a multi-valued field combine disjunctively through a single
//! `VALUES` block, so `variables = [d18O, Sr_Ca]` matches a dataset that has
//! either variable.
//!
//! Compilation is pure: the same `ExtractedQuery` always yields the same
//! text. A populated field that cannot be resolved to an ontology term,
//! period or region is an error and never silently dropped.

use super::compiled::CompiledQuery;
use super::namespace::{prefix_block, term};
use super::temporal::{format_number, temporal_pattern, TimeInterval};
use crate::schema::{parameter_schema, regions, ParameterSchema, Region};
use crate::types::{ExtractedQuery, PaleoError, Resolution, Result};
use std::collections::BTreeMap;

/// Year units accepted for resolution thresholds.
const YEAR_UNITS: &str = "punits:yr_AD, punits:yr_BP, punits:yr";

/// Units finer than a year.
const SUBANNUAL_UNITS: &str = "punits:month, punits:day, punits:hour";

/// Compiles `ExtractedQuery` values into SPARQL.
#[derive(Debug, Clone, Copy)]
pub struct SparqlCompiler {
    schema: &'static ParameterSchema,
}

impl Default for SparqlCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl SparqlCompiler {
    /// Create a compiler over the shared parameter schema.
    pub fn new() -> Self {
        Self {
            schema: parameter_schema(),
        }
    }

    /// Compile extracted parameters.
    ///
    /// # Arguments
    ///
    /// * `params` - Extracted parameters; absent fields add no constraint
    ///
    /// # Returns
    ///
    /// Query text plus the resolved value of each constraint
    ///
    /// # Errors
    ///
    /// Returns `CompilationError` if a populated field has a value outside
    /// its vocabulary, or the time period / location is not in its table
    ///
    /// # Example
    ///
    /// ```
    /// use paleo_query::query::SparqlCompiler;
    /// use paleo_query::ExtractedQuery;
    ///
    /// let compiled = SparqlCompiler::new()
    ///     .compile(&ExtractedQuery::new().with_archive_type("Coral"))
    ///     .unwrap();
    /// assert!(compiled.text().contains("le:hasArchiveType archive:Coral"));
    /// ```
    pub fn compile(&self, params: &ExtractedQuery) -> Result<CompiledQuery> {
        let mut bindings = BTreeMap::new();
        let mut body: Vec<String> = vec![
            "?dataset rdf:type le:Dataset .".to_string(),
            "?dataset le:hasName ?datasetName .".to_string(),
        ];

        if let Some(raw) = &params.archive_type {
            let archive = self.canonical("archive_type", raw)?;
            body.push(format!("?dataset le:hasArchiveType {} .", term("archive", archive)));
            bindings.insert("archive_type".to_string(), archive.to_string());
        }

        // Node the resolution constraint attaches to
        let mut resolution_node: Option<&str> = None;

        if let Some(values) = &params.variables {
            let names = self.canonical_list("variables", values)?;
            if !names.is_empty() {
                body.push(variable_pattern(&names));
                bindings.insert("variables".to_string(), names.join(","));
                resolution_node = Some("?variable");
            }
        }

        if let Some(values) = &params.interpretations {
            let names = self.canonical_list("interpretations", values)?;
            if !names.is_empty() {
                body.push(interpretation_pattern(&names));
                bindings.insert("interpretations".to_string(), names.join(","));
                resolution_node.get_or_insert("?interpVariable");
            }
        }

        if let Some(resolution) = params.resolution {
            let node = match resolution_node {
                Some(node) => node,
                None => {
                    body.push(
                        [
                            "?dataset le:hasPaleoData ?resData .",
                            "?resData le:hasMeasurementTable ?resTable .",
                            "?resTable le:hasVariable ?resVariable .",
                        ]
                        .join("\n"),
                    );
                    "?resVariable"
                }
            };
            body.push(resolution_pattern(node, resolution));
            bindings.insert("resolution".to_string(), resolution.as_str().to_string());
        }

        if let Some(period) = &params.time_period {
            let interval = TimeInterval::for_period(period)?;
            body.push(temporal_pattern(&interval, params.time_overlap));
            bindings.insert("time_period".to_string(), interval.to_string());
            bindings.insert(
                "time_overlap".to_string(),
                params.time_overlap.as_str().to_string(),
            );
        }

        if let Some(location) = &params.location {
            let name = self.canonical("location", location)?;
            let region = regions::get(name).ok_or_else(|| {
                PaleoError::compilation(format!("region '{}' has no bounding box", name))
            })?;
            body.push(location_pattern(region));
            bindings.insert("location".to_string(), region.name.to_string());
        }

        let text = format!(
            "{}\n\nSELECT DISTINCT ?datasetName WHERE {{\n{}\n}}\n",
            prefix_block(),
            indent(&body.join("\n"))
        );
        Ok(CompiledQuery::new(text, bindings))
    }

    fn canonical(&self, field: &str, raw: &str) -> Result<&'static str> {
        self.schema.resolve(field, raw).ok_or_else(|| {
            PaleoError::compilation(format!("'{}' is not a known {} value", raw, field))
        })
    }

    /// Resolve every entry, dropping duplicates but keeping order.
    fn canonical_list(&self, field: &str, raw: &[String]) -> Result<Vec<&'static str>> {
        let mut names: Vec<&'static str> = Vec::with_capacity(raw.len());
        for value in raw {
            let name = self.canonical(field, value)?;
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

fn variable_pattern(names: &[&str]) -> String {
    let values = names
        .iter()
        .map(|n| term("pvar", n))
        .collect::<Vec<_>>()
        .join(" ");
    [
        "?dataset le:hasPaleoData ?paleoData .".to_string(),
        "?paleoData le:hasMeasurementTable ?dataTable .".to_string(),
        "?dataTable le:hasVariable ?variable .".to_string(),
        "?variable le:hasStandardVariable ?standardVariable .".to_string(),
        format!("VALUES ?standardVariable {{ {} }}", values),
    ]
    .join("\n")
}

fn interpretation_pattern(names: &[&str]) -> String {
    let values = names
        .iter()
        .map(|n| term("interp", n))
        .collect::<Vec<_>>()
        .join(" ");
    [
        "?dataset le:hasPaleoData ?interpData .".to_string(),
        "?interpData le:hasMeasurementTable ?interpTable .".to_string(),
        "?interpTable le:hasVariable ?interpVariable .".to_string(),
        "?interpVariable le:hasInterpretation ?interpretation .".to_string(),
        "?interpretation le:hasVariable ?interpretationVariable .".to_string(),
        format!("VALUES ?interpretationVariable {{ {} }}", values),
    ]
    .join("\n")
}

/// Resolution branches: year units under the threshold, any sub-annual
/// unit, and (from decadal upward) unit-less resolutions under the
/// threshold. Sub-annual only accepts sub-annual units.
fn resolution_pattern(node: &str, resolution: Resolution) -> String {
    let mut lines = vec![format!("{} le:hasResolution ?resolution .", node)];
    let subannual = format!(
        "{{ ?resolution le:hasUnits ?resUnits . FILTER(?resUnits IN ({})) }}",
        SUBANNUAL_UNITS
    );

    match resolution.max_years() {
        None => lines.push(subannual),
        Some(max) => {
            lines.push(format!(
                "{{ ?resolution le:hasUnits ?resUnits ; le:hasMaxValue ?resMax . FILTER(?resUnits IN ({})) FILTER(?resMax <= {}) }}",
                YEAR_UNITS, max
            ));
            lines.push("UNION".to_string());
            lines.push(subannual);
            if max >= 10 {
                lines.push("UNION".to_string());
                lines.push(format!(
                    "{{ ?resolution le:hasMaxValue ?resMax . FILTER NOT EXISTS {{ ?resolution le:hasUnits ?anyUnits }} FILTER(?resMax <= {}) }}",
                    max
                ));
            }
        }
    }
    lines.join("\n")
}

fn location_pattern(region: &Region) -> String {
    let lon_filter = if region.crosses_antimeridian() {
        format!(
            "FILTER(?lon >= {} || ?lon <= {})",
            format_number(region.min_lon),
            format_number(region.max_lon)
        )
    } else {
        format!(
            "FILTER(?lon >= {} && ?lon <= {})",
            format_number(region.min_lon),
            format_number(region.max_lon)
        )
    };
    [
        "?dataset le:hasLocation ?location .".to_string(),
        "?location le:hasLatitude ?lat ; le:hasLongitude ?lon .".to_string(),
        format!(
            "FILTER(?lat >= {} && ?lat <= {})",
            format_number(region.min_lat),
            format_number(region.max_lat)
        ),
        lon_filter,
    ]
    .join("\n")
}

fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
