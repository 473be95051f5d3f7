//! Property tests for interval overlap and unit conversion.

use paleo_query::query::temporal::overlap_condition;
use paleo_query::query::{AgeUnit, TimeInterval};
use paleo_query::OverlapMode;
use proptest::prelude::*;

fn interval() -> impl Strategy<Value = TimeInterval> {
    (-100_000i64..5_000_000, 0i64..5_000_000).prop_map(|(start, width)| {
        TimeInterval::new(start as f64, (start + width) as f64).unwrap()
    })
}

fn mode() -> impl Strategy<Value = OverlapMode> {
    prop::sample::select(OverlapMode::ALL.to_vec())
}

fn unit() -> impl Strategy<Value = AgeUnit> {
    prop::sample::select(AgeUnit::ALL.to_vec())
}

/// Evaluate a rendered condition `?ageStart op A && ?ageEnd op B`.
fn evaluate(condition: &str, start: f64, end: f64) -> bool {
    condition.split(" && ").all(|clause| {
        let parts: Vec<&str> = clause.split_whitespace().collect();
        let value = match parts[0] {
            "?ageStart" => start,
            "?ageEnd" => end,
            other => panic!("unexpected variable {}", other),
        };
        let bound: f64 = parts[2].parse().unwrap();
        match parts[1] {
            "<=" => value <= bound,
            ">=" => value >= bound,
            other => panic!("unexpected operator {}", other),
        }
    })
}

proptest! {
    #[test]
    fn prop_rendered_condition_matches_satisfies(
        dataset in interval(),
        query in interval(),
        mode in mode(),
    ) {
        let condition = overlap_condition(mode, &query, "?ageStart", "?ageEnd");
        prop_assert_eq!(
            evaluate(&condition, dataset.start, dataset.end),
            dataset.satisfies(mode, &query)
        );
    }

    #[test]
    fn prop_containment_implies_partial(dataset in interval(), query in interval()) {
        if dataset.satisfies(OverlapMode::Containing, &query)
            || dataset.satisfies(OverlapMode::Contained, &query)
        {
            prop_assert!(dataset.satisfies(OverlapMode::Partial, &query));
        }
    }

    #[test]
    fn prop_partial_is_symmetric(a in interval(), b in interval()) {
        prop_assert_eq!(
            a.satisfies(OverlapMode::Partial, &b),
            b.satisfies(OverlapMode::Partial, &a)
        );
    }

    #[test]
    fn prop_contained_is_containing_reversed(a in interval(), b in interval()) {
        prop_assert_eq!(
            a.satisfies(OverlapMode::Contained, &b),
            b.satisfies(OverlapMode::Containing, &a)
        );
    }

    #[test]
    fn prop_converted_interval_is_ordered(
        unit in unit(),
        min in -5_000i64..5_000,
        width in 0i64..5_000,
    ) {
        let converted = unit.interval(min as f64, (min + width) as f64).unwrap();
        prop_assert!(converted.start <= converted.end);
    }
}
