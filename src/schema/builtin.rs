//! Built-in parameter fields.
//!
//! The LinkedEarth ontology terms the extractor may produce:
//! - `archive_type` - archive classes (`archive:` namespace)
//! - `variables` - standard paleo variables (`pvar:` namespace)
//! - `interpretations` - interpretation variables (`interp:` namespace)
//! - `resolution`, `time_overlap` - closed enumerations
//! - `time_period`, `location` - backed by the period and region tables

use super::field::{FieldKind, FieldSpec, MatchMode, Term, Vocabulary};
use super::{periods, regions};
use crate::types::{OverlapMode, Resolution};

/// Archive types. Canonical names are `archive:` local names.
pub const ARCHIVE_TYPES: &[Term] = &[
    Term::new("Coral", &["corals", "coral reef"]),
    Term::new("GlacierIce", &["ice core", "ice cores", "ice", "glacier", "glacier ice"]),
    Term::new("LakeSediment", &["lake", "lake sediments", "lacustrine", "lacustrine sediment"]),
    Term::new(
        "MarineSediment",
        &["marine", "marine sediments", "ocean sediment", "deep sea sediment", "marine core"],
    ),
    Term::new("MolluskShell", &["mollusk", "mollusc", "mollusk shells", "shell", "bivalve"]),
    Term::new("Sclerosponge", &["sclerosponges", "sponge"]),
    Term::new("Speleothem", &["speleothems", "stalagmite", "stalactite", "cave"]),
    Term::new("WoodOrTree", &["tree", "trees", "tree ring", "tree rings", "wood", "dendro"]),
];

/// Measured variables. Canonical names are `pvar:` local names.
pub const VARIABLES: &[Term] = &[
    Term::new("d18O", &["δ18O", "delta18O", "delta O18", "oxygen isotope", "oxygen isotopes"]),
    Term::new("d13C", &["δ13C", "delta13C", "carbon isotope", "carbon isotopes"]),
    Term::new("dD", &["δD", "deltaD", "deuterium"]),
    Term::new("Sr_Ca", &["Sr/Ca", "strontium calcium"]),
    Term::new("Mg_Ca", &["Mg/Ca", "magnesium calcium"]),
    Term::new("temperature", &["temp"]),
    Term::new("precipitation", &["rainfall"]),
    Term::new("salinity", &[]),
    Term::new("pH", &[]),
    Term::new("radiocarbon", &["14C", "C14", "carbon 14"]),
    Term::new("ringWidth", &["ring width", "tree ring width", "trw"]),
];

/// Interpretations. Canonical names are `interp:` local names.
pub const INTERPRETATIONS: &[Term] = &[
    Term::new("temperature", &["temp", "air temperature"]),
    Term::new("precipitation", &["rainfall", "rain"]),
    Term::new("seawater_temperature", &["seawater temperature", "water temperature"]),
    Term::new("sea_surface_temperature", &["SST", "sea surface temperature"]),
    Term::new("atmospheric_circulation", &["circulation", "atmospheric circulation"]),
    Term::new("salinity", &["sea surface salinity", "SSS"]),
    Term::new("ice_volume", &["global ice volume"]),
    Term::new("upwelling", &[]),
];

const RESOLUTIONS: &[Term] = &[
    Term::new(
        "subannual",
        &["sub-annual", "monthly", "month", "seasonal", "season", "weekly", "daily"],
    ),
    Term::new("annual", &["annually", "annually resolved", "yearly", "yr", "year"]),
    Term::new("decadal", &["decade", "decades", "decadally resolved"]),
    Term::new("centennial", &["century", "centuries"]),
    Term::new("millennial", &["millennium", "millennia"]),
];

const OVERLAPS: &[Term] = &[
    Term::new("partial", &["overlap", "overlaps", "overlapping", "partially", "intersecting"]),
    Term::new("containing", &["contains", "contain", "fully contains", "fully contain"]),
    Term::new("contained", &["within", "inside", "contained in", "contained within", "fully within"]),
];

/// Build the built-in field list, in prompt order.
///
/// # Returns
///
/// Field specifications for all seven parameters
pub fn builtin_fields() -> Vec<FieldSpec> {
    // Enumerations must stay in sync with their Rust types
    debug_assert!(RESOLUTIONS.len() == Resolution::ALL.len());
    debug_assert!(OVERLAPS.len() == OverlapMode::ALL.len());

    vec![
        FieldSpec {
            name: "archive_type",
            kind: FieldKind::Enumerated,
            match_mode: MatchMode::Exact,
            description: "The type of paleoclimate archive (physical medium sampled)",
            vocabulary: Vocabulary::new(ARCHIVE_TYPES.to_vec()),
            default: None,
        },
        FieldSpec {
            name: "variables",
            kind: FieldKind::List,
            match_mode: MatchMode::Exact,
            description: "Directly measured quantities (e.g. isotope ratios, element ratios)",
            vocabulary: Vocabulary::new(VARIABLES.to_vec()),
            default: None,
        },
        FieldSpec {
            name: "interpretations",
            kind: FieldKind::List,
            match_mode: MatchMode::Exact,
            description: "Climate quantities inferred from the measurements",
            vocabulary: Vocabulary::new(INTERPRETATIONS.to_vec()),
            default: None,
        },
        FieldSpec {
            name: "resolution",
            kind: FieldKind::Enumerated,
            match_mode: MatchMode::Exact,
            description: "Temporal resolution of the data",
            vocabulary: Vocabulary::new(RESOLUTIONS.to_vec()),
            default: None,
        },
        FieldSpec {
            name: "time_period",
            kind: FieldKind::Enumerated,
            match_mode: MatchMode::Exact,
            description: "Named time period of interest",
            vocabulary: Vocabulary::new(periods::terms()),
            default: None,
        },
        FieldSpec {
            name: "location",
            kind: FieldKind::Text,
            match_mode: MatchMode::Substring,
            description: "Geographic region of interest",
            vocabulary: Vocabulary::new(regions::terms()),
            default: None,
        },
        FieldSpec {
            name: "time_overlap",
            kind: FieldKind::Enumerated,
            match_mode: MatchMode::Exact,
            description: "How a dataset's age range must relate to the time period: partial (any overlap), containing (dataset spans the whole period), contained (dataset lies inside the period)",
            vocabulary: Vocabulary::new(OVERLAPS.to_vec()),
            default: Some("partial"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerations_match_rust_types() {
        let resolutions: Vec<&str> = RESOLUTIONS.iter().map(|t| t.canonical).collect();
        let expected: Vec<&str> = Resolution::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(resolutions, expected);

        let overlaps: Vec<&str> = OVERLAPS.iter().map(|t| t.canonical).collect();
        let expected: Vec<&str> = OverlapMode::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(overlaps, expected);
    }

    #[test]
    fn test_canonical_names_are_iri_safe() {
        for term in ARCHIVE_TYPES.iter().chain(VARIABLES).chain(INTERPRETATIONS) {
            assert!(
                term.canonical.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "{} is not a plain local name",
                term.canonical
            );
        }
    }

    #[test]
    fn test_field_order() {
        let names: Vec<&str> = builtin_fields().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "archive_type",
                "variables",
                "interpretations",
                "resolution",
                "time_period",
                "location",
                "time_overlap"
            ]
        );
    }
}
