//! Property-based tests for color difference, matching and gum scoring
//!
//! Checks invariants that must hold for any input in range, not just for the
//! handful of reference colors used by the unit tests.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use dental_shade::gum::{classify, GumHealthMetrics};
use dental_shade::{ciede2000, find_best_match, step_difference, LabColor, Shade};
use proptest::prelude::*;

fn lab_strategy() -> impl Strategy<Value = LabColor> {
    (0.0f64..=100.0, -128.0f64..=127.0, -128.0f64..=127.0)
        .prop_map(|(l, a, b)| LabColor::new(l, a, b))
}

fn shade_strategy() -> impl Strategy<Value = Shade> {
    (0..Shade::ALL.len()).prop_map(|index| Shade::ALL[index])
}

proptest! {
    #[test]
    fn difference_of_identical_colors_is_zero(lab in lab_strategy()) {
        prop_assert_eq!(ciede2000(lab, lab), 0.0);
    }

    #[test]
    fn difference_is_symmetric_and_non_negative(x in lab_strategy(), y in lab_strategy()) {
        let forward = ciede2000(x, y);
        let backward = ciede2000(y, x);
        prop_assert!(forward >= 0.0);
        prop_assert!(forward.is_finite());
        prop_assert!((forward - backward).abs() < 1e-9, "{} vs {}", forward, backward);
    }

    #[test]
    fn step_difference_is_antisymmetric(from in shade_strategy(), to in shade_strategy()) {
        prop_assert_eq!(step_difference(from, to), -step_difference(to, from));
    }

    #[test]
    fn current_shade_match_is_never_bleached(lab in lab_strategy()) {
        let result = find_best_match(lab, true);
        prop_assert!(!result.shade.is_bleached());
        prop_assert!(result.alternatives.iter().all(|alt| !alt.shade.is_bleached()));
        prop_assert!(result.alternatives.iter().all(|alt| alt.delta_e >= result.delta_e));
    }

    #[test]
    fn classification_is_monotonic_in_redness(
        low in 0.0f64..40.0,
        bump in 0.0f64..20.0,
        percentage in 0.0f64..=100.0,
        swelling in 0.0f64..20.0,
    ) {
        let metrics = |mean_redness: f64| GumHealthMetrics {
            mean_redness,
            std_redness: 2.0,
            redness_percentage: percentage,
            swelling_indicator: swelling,
        };

        let milder = classify(&metrics(low));
        let redder = classify(&metrics(low + bump));
        prop_assert!(redder.inflammation_score >= milder.inflammation_score);
        prop_assert!(redder.status >= milder.status);
        prop_assert!((0.0..=100.0).contains(&redder.inflammation_score));
    }
}
