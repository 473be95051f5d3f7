//! Extracted query parameters.
//!
//! `ExtractedQuery` is the contract between the model-facing extractor and
//! the SPARQL compiler. A field is either populated with vocabulary-legal
//! values or `None`; empty strings and empty lists are never stored, so an
//! absent field always means "don't filter".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Temporal sampling density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Monthly, seasonal or finer
    Subannual,
    /// One sample per year or finer
    Annual,
    /// Ten years or finer
    Decadal,
    /// A hundred years or finer
    Centennial,
    /// A thousand years or finer
    Millennial,
}

impl Resolution {
    /// All resolutions, finest first.
    pub const ALL: [Resolution; 5] = [
        Self::Subannual,
        Self::Annual,
        Self::Decadal,
        Self::Centennial,
        Self::Millennial,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subannual => "subannual",
            Self::Annual => "annual",
            Self::Decadal => "decadal",
            Self::Centennial => "centennial",
            Self::Millennial => "millennial",
        }
    }

    /// Largest sample spacing (in years) that still satisfies this resolution.
    ///
    /// `None` for sub-annual, which is matched on units only.
    pub fn max_years(&self) -> Option<u32> {
        match self {
            Self::Subannual => None,
            Self::Annual => Some(1),
            Self::Decadal => Some(10),
            Self::Centennial => Some(100),
            Self::Millennial => Some(1000),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown resolution '{}'", s))
    }
}

/// How a dataset's age range must relate to the queried period.
///
/// With the query period `[qs, qe]` and the dataset range `[ds, de]`
/// (years BP, start <= end):
/// - `Partial`: ranges intersect, `ds <= qe && de >= qs`
/// - `Containing`: dataset contains the period, `ds <= qs && de >= qe`
/// - `Contained`: dataset lies inside the period, `ds >= qs && de <= qe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapMode {
    #[default]
    Partial,
    Containing,
    Contained,
}

impl OverlapMode {
    /// All modes in declaration order.
    pub const ALL: [OverlapMode; 3] = [Self::Partial, Self::Containing, Self::Contained];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Partial => "partial",
            Self::Containing => "containing",
            Self::Contained => "contained",
        }
    }
}

impl fmt::Display for OverlapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlapMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown time overlap '{}'", s))
    }
}

/// Query parameters extracted from a natural language request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedQuery {
    /// Archive type, canonical ontology name (e.g. "Coral")
    pub archive_type: Option<String>,

    /// Measured variables; a dataset matches if it has any of them
    pub variables: Option<Vec<String>>,

    /// Climate interpretations; a dataset matches if it has any of them
    pub interpretations: Option<Vec<String>>,

    /// Temporal resolution
    pub resolution: Option<Resolution>,

    /// Named time period from the period table (e.g. "Holocene")
    pub time_period: Option<String>,

    /// Named region from the region table (e.g. "Pacific Ocean")
    pub location: Option<String>,

    /// Overlap policy for `time_period`
    #[serde(default)]
    pub time_overlap: OverlapMode,
}

impl ExtractedQuery {
    /// Create an empty (unconstrained) query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set archive type; blank values leave the field absent.
    pub fn with_archive_type(mut self, archive_type: impl Into<String>) -> Self {
        self.archive_type = non_blank(archive_type.into());
        self
    }

    /// Set variables; an empty list leaves the field absent.
    pub fn with_variables<I, S>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables = non_empty_list(variables);
        self
    }

    /// Set interpretations; an empty list leaves the field absent.
    pub fn with_interpretations<I, S>(mut self, interpretations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interpretations = non_empty_list(interpretations);
        self
    }

    /// Set resolution.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Set time period; blank values leave the field absent.
    pub fn with_time_period(mut self, period: impl Into<String>) -> Self {
        self.time_period = non_blank(period.into());
        self
    }

    /// Set location; blank values leave the field absent.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    /// Set overlap mode.
    pub fn with_time_overlap(mut self, mode: OverlapMode) -> Self {
        self.time_overlap = mode;
        self
    }

    /// Names of populated filter fields, in schema order.
    ///
    /// `time_overlap` is a modifier of `time_period` and is never listed.
    pub fn populated_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.archive_type.is_some() {
            fields.push("archive_type");
        }
        if self.variables.is_some() {
            fields.push("variables");
        }
        if self.interpretations.is_some() {
            fields.push("interpretations");
        }
        if self.resolution.is_some() {
            fields.push("resolution");
        }
        if self.time_period.is_some() {
            fields.push("time_period");
        }
        if self.location.is_some() {
            fields.push("location");
        }
        fields
    }

    /// `true` when no filter field is populated.
    pub fn is_unconstrained(&self) -> bool {
        self.populated_fields().is_empty()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn non_empty_list<I, S>(values: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let list: Vec<String> = values
        .into_iter()
        .filter_map(|v| non_blank(v.into()))
        .collect();
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconstrained_partial() {
        let q = ExtractedQuery::new();
        assert!(q.is_unconstrained());
        assert_eq!(q.time_overlap, OverlapMode::Partial);
    }

    #[test]
    fn test_blank_values_stay_absent() {
        let q = ExtractedQuery::new()
            .with_archive_type("  ")
            .with_variables(Vec::<String>::new())
            .with_interpretations(vec!["", " "])
            .with_location("");
        assert!(q.archive_type.is_none());
        assert!(q.variables.is_none());
        assert!(q.interpretations.is_none());
        assert!(q.location.is_none());
        assert!(q.is_unconstrained());
    }

    #[test]
    fn test_populated_fields_in_schema_order() {
        let q = ExtractedQuery::new()
            .with_location("Europe")
            .with_archive_type("Coral")
            .with_time_period("Holocene");
        assert_eq!(
            q.populated_fields(),
            vec!["archive_type", "time_period", "location"]
        );
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Decadal".parse::<Resolution>().unwrap(), Resolution::Decadal);
        assert!("weekly".parse::<Resolution>().is_err());
        assert_eq!(
            " contained ".parse::<OverlapMode>().unwrap(),
            OverlapMode::Contained
        );
        assert!("overlapping".parse::<OverlapMode>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let q = ExtractedQuery::new()
            .with_resolution(Resolution::Annual)
            .with_time_overlap(OverlapMode::Containing);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["resolution"], "annual");
        assert_eq!(json["time_overlap"], "containing");
        assert!(json["archive_type"].is_null());
    }
}
