//! Time intervals, age units and overlap predicates.
//!
//! All comparisons happen in years BP. Datasets store their age range as a
//! min/max pair in whatever unit the time variable uses, so the compiled
//! query converts both bounds with `age = offset + scale * value` and then
//! re-orders them (calendar years run the opposite way from BP).

use crate::schema::periods::{self, Period};
use crate::types::{OverlapMode, PaleoError, Result};
use std::fmt;

/// Closed interval `[start, end]` in years BP with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    pub start: f64,
    pub end: f64,
}

impl TimeInterval {
    /// Create an interval.
    ///
    /// # Errors
    ///
    /// Returns `CompilationError` if a bound is not finite or `start > end`
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(PaleoError::compilation(format!(
                "interval bounds must be finite, got [{}, {}]",
                start, end
            )));
        }
        if start > end {
            return Err(PaleoError::compilation(format!(
                "interval start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Interval spanned by a named period.
    pub fn from_period(period: &Period) -> Self {
        Self {
            start: period.start_bp as f64,
            end: period.end_bp as f64,
        }
    }

    /// Resolve a period name (or alias) to its interval.
    ///
    /// # Errors
    ///
    /// Returns `CompilationError` if the name is not in the period table
    pub fn for_period(name: &str) -> Result<Self> {
        periods::lookup(name)
            .map(Self::from_period)
            .ok_or_else(|| PaleoError::compilation(format!("unknown time period '{}'", name)))
    }

    /// Check whether this (dataset) interval satisfies `mode` against `query`.
    ///
    /// Mirrors the compiled FILTER exactly; used by tests and by fake stores.
    pub fn satisfies(&self, mode: OverlapMode, query: &TimeInterval) -> bool {
        match mode {
            OverlapMode::Partial => self.start <= query.end && self.end >= query.start,
            OverlapMode::Containing => self.start <= query.start && self.end >= query.end,
            OverlapMode::Contained => self.start >= query.start && self.end <= query.end,
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] BP", self.start, self.end)
    }
}

/// Age units a time variable may be recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeUnit {
    YearsBp,
    YearsAd,
    YearsCe,
    YearsB2k,
    Ka,
    Kyr,
}

impl AgeUnit {
    pub const ALL: [AgeUnit; 6] = [
        Self::YearsBp,
        Self::YearsAd,
        Self::YearsCe,
        Self::YearsB2k,
        Self::Ka,
        Self::Kyr,
    ];

    /// Local name in the `punits:` namespace.
    pub fn iri_local(&self) -> &'static str {
        match self {
            Self::YearsBp => "yr_BP",
            Self::YearsAd => "yr_AD",
            Self::YearsCe => "yr_CE",
            Self::YearsB2k => "yr_b2k",
            Self::Ka => "ka",
            Self::Kyr => "kyr",
        }
    }

    /// Multiplier in `bp = offset + scale * value`.
    pub fn scale(&self) -> i64 {
        match self {
            Self::YearsBp | Self::YearsB2k => 1,
            Self::YearsAd | Self::YearsCe => -1,
            Self::Ka | Self::Kyr => 1000,
        }
    }

    /// Offset in `bp = offset + scale * value`.
    pub fn offset(&self) -> i64 {
        match self {
            Self::YearsBp | Self::Ka | Self::Kyr => 0,
            Self::YearsAd | Self::YearsCe => 1950,
            Self::YearsB2k => -50,
        }
    }

    /// Convert a value in this unit to years BP.
    pub fn to_years_bp(&self, value: f64) -> f64 {
        self.offset() as f64 + self.scale() as f64 * value
    }

    /// Convert a stored min/max pair to an ordered BP interval.
    ///
    /// # Errors
    ///
    /// Returns `CompilationError` for non-finite values
    pub fn interval(&self, min: f64, max: f64) -> Result<TimeInterval> {
        let a = self.to_years_bp(min);
        let b = self.to_years_bp(max);
        TimeInterval::new(a.min(b), a.max(b))
    }
}

/// Variable names shared by the temporal pattern.
const AGE_START: &str = "?ageStart";
const AGE_END: &str = "?ageEnd";

/// Render the FILTER expression for an overlap mode.
///
/// `start_var`/`end_var` must hold the dataset interval in years BP.
pub fn overlap_condition(mode: OverlapMode, query: &TimeInterval, start_var: &str, end_var: &str) -> String {
    let (qs, qe) = (format_number(query.start), format_number(query.end));
    match mode {
        OverlapMode::Partial => format!("{} <= {} && {} >= {}", start_var, qe, end_var, qs),
        OverlapMode::Containing => format!("{} <= {} && {} >= {}", start_var, qs, end_var, qe),
        OverlapMode::Contained => format!("{} >= {} && {} <= {}", start_var, qs, end_var, qe),
    }
}

/// Compile the graph pattern matching datasets whose age range satisfies
/// `mode` against `query`.
///
/// The pattern locates the dataset's time variable (by standard name or
/// label), converts its min/max into BP and applies a single FILTER. The
/// variable names it introduces are prefixed with `?time`/`?age`.
pub fn temporal_pattern(query: &TimeInterval, mode: OverlapMode) -> String {
    let units = AgeUnit::ALL
        .iter()
        .map(|u| format!("(punits:{} {} {})", u.iri_local(), u.scale(), u.offset()))
        .collect::<Vec<_>>()
        .join(" ");

    let lines = [
        "?dataset le:hasPaleoData ?timeData .".to_string(),
        "?timeData le:hasMeasurementTable ?timeTable .".to_string(),
        "?timeTable le:hasVariable ?timeVar .".to_string(),
        "{ ?timeVar le:hasStandardVariable ?timeStandard . VALUES ?timeStandard { pvar:age pvar:year } }".to_string(),
        "UNION".to_string(),
        "{ ?timeVar rdfs:label ?timeLabel . FILTER(REGEX(STR(?timeLabel), \"year|age|yr|ka\", \"i\")) }".to_string(),
        "?timeVar le:hasUnits ?timeUnits .".to_string(),
        "?timeVar le:hasMinValue ?timeMin .".to_string(),
        "?timeVar le:hasMaxValue ?timeMax .".to_string(),
        format!("VALUES (?timeUnits ?ageScale ?ageOffset) {{ {} }}", units),
        "BIND(?ageOffset + ?ageScale * xsd:double(?timeMin) AS ?ageA)".to_string(),
        "BIND(?ageOffset + ?ageScale * xsd:double(?timeMax) AS ?ageB)".to_string(),
        format!("BIND(IF(?ageA <= ?ageB, ?ageA, ?ageB) AS {})", AGE_START),
        format!("BIND(IF(?ageA <= ?ageB, ?ageB, ?ageA) AS {})", AGE_END),
        format!("FILTER({})", overlap_condition(mode, query, AGE_START, AGE_END)),
    ];
    lines.join("\n")
}

/// Format a bound without a trailing `.0` for whole numbers.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holocene() -> TimeInterval {
        TimeInterval::for_period("Holocene").unwrap()
    }

    #[test]
    fn test_interval_validation() {
        assert!(TimeInterval::new(0.0, 11700.0).is_ok());
        assert!(TimeInterval::new(5.0, 5.0).is_ok());
        assert!(TimeInterval::new(10.0, 5.0).is_err());
        assert!(TimeInterval::new(f64::NAN, 5.0).is_err());
        assert!(TimeInterval::for_period("Atlantis").is_err());
    }

    #[test]
    fn test_overlap_direction() {
        let q = holocene();
        let inside = TimeInterval::new(5000.0, 8000.0).unwrap();
        assert!(inside.satisfies(OverlapMode::Partial, &q));
        assert!(inside.satisfies(OverlapMode::Contained, &q));
        assert!(!inside.satisfies(OverlapMode::Containing, &q));

        let spanning = TimeInterval::new(0.0, 20000.0).unwrap();
        assert!(spanning.satisfies(OverlapMode::Containing, &q));
        assert!(!spanning.satisfies(OverlapMode::Contained, &q));

        let older = TimeInterval::new(12000.0, 20000.0).unwrap();
        assert!(!older.satisfies(OverlapMode::Partial, &q));
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(AgeUnit::YearsAd.to_years_bp(1950.0), 0.0);
        assert_eq!(AgeUnit::YearsCe.to_years_bp(1000.0), 950.0);
        assert_eq!(AgeUnit::YearsB2k.to_years_bp(100.0), 50.0);
        assert_eq!(AgeUnit::Ka.to_years_bp(11.7), 11700.0);
        assert_eq!(AgeUnit::YearsBp.to_years_bp(42.0), 42.0);

        // Calendar years flip order
        let interval = AgeUnit::YearsAd.interval(1000.0, 1900.0).unwrap();
        assert_eq!((interval.start, interval.end), (50.0, 950.0));
    }

    #[test]
    fn test_overlap_condition_text() {
        let q = holocene();
        assert_eq!(
            overlap_condition(OverlapMode::Partial, &q, "?s", "?e"),
            "?s <= 11700 && ?e >= 0"
        );
        assert_eq!(
            overlap_condition(OverlapMode::Containing, &q, "?s", "?e"),
            "?s <= 0 && ?e >= 11700"
        );
        assert_eq!(
            overlap_condition(OverlapMode::Contained, &q, "?s", "?e"),
            "?s >= 0 && ?e <= 11700"
        );
    }

    #[test]
    fn test_temporal_pattern_has_single_filter_after_binds() {
        let text = temporal_pattern(&holocene(), OverlapMode::Partial);
        assert_eq!(text.matches("FILTER(?ageStart").count(), 1);
        let values = text.find("VALUES (?timeUnits").unwrap();
        let bind = text.find("BIND(IF").unwrap();
        let filter = text.find("FILTER(?ageStart").unwrap();
        assert!(values < bind && bind < filter);
        assert!(text.contains("(punits:yr_AD -1 1950)"));
        assert!(text.contains("(punits:yr_b2k 1 -50)"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(11700.0), "11700");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-50.0), "-50");
    }
}
