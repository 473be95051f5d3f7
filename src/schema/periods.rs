//! Named time periods and their age bounds.
//!
//! Ages are years BP (before 1950 CE), increasing into the past. Each
//! period is `[start_bp, end_bp]` with `start_bp <= end_bp`, so the
//! youngest boundary comes first.

use super::field::{normalize_key, Term};

/// A named period with its age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub name: &'static str,
    pub start_bp: u64,
    pub end_bp: u64,
}

const fn period(name: &'static str, start_bp: u64, end_bp: u64) -> Period {
    Period {
        name,
        start_bp,
        end_bp,
    }
}

/// Period table.
pub const PERIODS: &[Period] = &[
    // Recent and historical
    period("LastCentury", 0, 100),
    period("Industrial", 0, 170),
    period("LastMillennium", 0, 1000),
    period("CommonEra", 0, 2000),
    // Holocene subdivisions
    period("LateHolocene", 0, 4200),
    period("MidHolocene", 4200, 8200),
    period("EarlyHolocene", 8200, 11700),
    period("Holocene", 0, 11700),
    // Late Pleistocene events
    period("YoungerDryas", 11700, 12900),
    period("BøllingAllerød", 12900, 14700),
    period("LastGlacialMaximum", 19000, 26500),
    period("LastGlacial", 11700, 115000),
    period("LastInterglacial", 115000, 130000),
    // Quaternary
    period("Pleistocene", 11700, 2580000),
    period("Quaternary", 0, 2580000),
    period("Gelasian", 1800000, 2580000),
    period("Calabrian", 781000, 1800000),
    period("MiddlePleistocene", 126000, 781000),
    period("LatePleistocene", 11700, 126000),
    // Neogene
    period("Pliocene", 2580000, 5333000),
    period("Zanclean", 3600000, 5333000),
    period("Piacenzian", 2580000, 3600000),
    period("Miocene", 5333000, 23030000),
    period("EarlyMiocene", 15970000, 23030000),
    period("MiddleMiocene", 11630000, 15970000),
    period("LateMiocene", 5333000, 11630000),
    period("Neogene", 2580000, 23030000),
    // Paleogene
    period("Oligocene", 23030000, 33900000),
    period("Rupelian", 28100000, 33900000),
    period("Chattian", 23030000, 28100000),
    period("Eocene", 33900000, 56000000),
    period("EarlyEocene", 47800000, 56000000),
    period("MiddleEocene", 38000000, 47800000),
    period("LateEocene", 33900000, 38000000),
    period("Paleocene", 56000000, 66000000),
    period("Paleogene", 23030000, 66000000),
    period("Cenozoic", 0, 66000000),
    // Mesozoic
    period("Cretaceous", 66000000, 145000000),
    period("EarlyCretaceous", 100500000, 145000000),
    period("LateCretaceous", 66000000, 100500000),
    period("Jurassic", 145000000, 201300000),
    period("EarlyJurassic", 174100000, 201300000),
    period("MiddleJurassic", 163500000, 174100000),
    period("LateJurassic", 145000000, 163500000),
    period("Triassic", 201300000, 251902000),
    period("EarlyTriassic", 247200000, 251902000),
    period("MiddleTriassic", 237000000, 247200000),
    period("LateTriassic", 201300000, 237000000),
    period("Mesozoic", 66000000, 251902000),
    // Paleozoic
    period("Permian", 251902000, 298900000),
    period("Carboniferous", 298900000, 358900000),
    period("Pennsylvanian", 298900000, 323200000),
    period("Mississippian", 323200000, 358900000),
    period("Devonian", 358900000, 419200000),
    period("Silurian", 419200000, 443800000),
    period("Ordovician", 443800000, 485400000),
    period("Cambrian", 485400000, 538800000),
    period("Paleozoic", 251902000, 538800000),
    // Precambrian (informal)
    period("Ediacaran", 538800000, 635000000),
    period("Cryogenian", 635000000, 720000000),
    period("Tonian", 720000000, 1000000000),
    period("Neoproterozoic", 538800000, 1000000000),
    period("Mesoproterozoic", 1000000000, 1600000000),
    period("Paleoproterozoic", 1600000000, 2500000000),
    period("Proterozoic", 538800000, 2500000000),
    period("Archean", 2500000000, 4000000000),
    period("Hadean", 4000000000, 4600000000),
    period("Precambrian", 538800000, 4600000000),
];

/// Aliases accepted in addition to the (punctuation-insensitive) names.
const ALIASES: &[(&str, &[&str])] = &[
    ("LastCentury", &["past century", "last 100 years"]),
    ("Industrial", &["industrial era", "industrial period"]),
    ("LastMillennium", &["past millennium", "last 1000 years", "LM"]),
    ("CommonEra", &["CE", "last 2000 years", "past two millennia", "last two millennia"]),
    ("MidHolocene", &["middle holocene"]),
    ("YoungerDryas", &["YD"]),
    ("BøllingAllerød", &["BollingAllerod", "Bolling Allerod"]),
    ("LastGlacialMaximum", &["LGM"]),
    ("LastInterglacial", &["LIG", "Eemian"]),
];

/// Look up a period by name or alias.
///
/// Matching ignores case, spaces and punctuation.
///
/// # Example
///
/// ```
/// use paleo_query::schema::periods::lookup;
///
/// let holocene = lookup("holocene").unwrap();
/// assert_eq!((holocene.start_bp, holocene.end_bp), (0, 11700));
/// assert_eq!(lookup("LGM").unwrap().name, "LastGlacialMaximum");
/// assert!(lookup("Jurassic Park").is_none());
/// ```
pub fn lookup(name: &str) -> Option<&'static Period> {
    let key = normalize_key(name);
    if key.is_empty() {
        return None;
    }
    PERIODS.iter().find(|p| normalize_key(p.name) == key).or_else(|| {
        ALIASES
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| normalize_key(a) == key))
            .and_then(|(canonical, _)| PERIODS.iter().find(|p| p.name == *canonical))
    })
}

/// Vocabulary terms for the `time_period` field.
pub fn terms() -> Vec<Term> {
    PERIODS
        .iter()
        .map(|p| {
            let aliases = ALIASES
                .iter()
                .find(|(canonical, _)| *canonical == p.name)
                .map(|(_, aliases)| *aliases)
                .unwrap_or(&[]);
            Term::new(p.name, aliases)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_are_ordered_intervals() {
        for p in PERIODS {
            assert!(p.start_bp <= p.end_bp, "{} has start after end", p.name);
        }
    }

    #[test]
    fn test_period_names_unique_after_normalization() {
        let mut keys: Vec<String> = PERIODS.iter().map(|p| normalize_key(p.name)).collect();
        keys.sort();
        let before = keys.len();
        keys.dedup();
        assert_eq!(before, keys.len());
    }

    #[test]
    fn test_aliases_point_at_known_periods() {
        for (canonical, _) in ALIASES {
            assert!(PERIODS.iter().any(|p| p.name == *canonical), "{}", canonical);
        }
    }

    #[test]
    fn test_lookup_variants() {
        assert_eq!(lookup("Holocene").unwrap().end_bp, 11700);
        assert_eq!(lookup("Last Glacial Maximum").unwrap().name, "LastGlacialMaximum");
        assert_eq!(lookup("common era").unwrap().end_bp, 2000);
        assert_eq!(lookup("Bølling-Allerød").unwrap().start_bp, 12900);
        assert_eq!(lookup("bolling allerod").unwrap().start_bp, 12900);
        assert!(lookup("").is_none());
        assert!(lookup("Anthropocene").is_none());
    }
}
