//! Reference constants for shade matching, planning and gum analysis
//!
//! This module contains compile-time constants grouped by the stage of the
//! pipeline that consumes them.

/// CIEDE2000 perceptual bands used for confidence scoring
pub mod delta_e {
    /// Below this a difference is imperceptible
    pub const IMPERCEPTIBLE: f64 = 1.0;

    /// Upper bound of the perceptible-but-acceptable band
    pub const ACCEPTABLE: f64 = 2.7;

    /// At or above this a clinical shade mismatch is unacceptable
    pub const CLINICALLY_UNACCEPTABLE: f64 = 3.3;

    /// 25^7, shared by the G and R_C terms of CIEDE2000
    pub const POW25_7: f64 = 6_103_515_625.0;

    /// Number of runner-up shades reported next to the primary match
    pub const MAX_ALTERNATIVES: usize = 3;
}

/// Whitening plan parameters
pub mod planning {
    /// Brightness-order steps attempted per desired level
    pub const SUBTLE_STEPS: usize = 2;
    pub const MODERATE_STEPS: usize = 4;
    pub const DRAMATIC_STEPS: usize = 6;

    /// Plans needing more steps than this are flagged unrealistic
    pub const REALISTIC_STEP_LIMIT: usize = 8;

    /// Suitability penalty for aggressive methods in the warmest season
    pub const WARM_SEASON_AGGRESSIVE_PENALTY: u8 = 25;

    /// Suitability lost per step outside a method's band
    pub const OUT_OF_BAND_PENALTY_PER_STEP: u8 = 20;

    /// Lowest suitability any method can be scored
    pub const MIN_SUITABILITY: u8 = 10;
}

/// Gum inflammation analysis parameters
pub mod gum {
    /// a* above which a single pixel counts as red
    pub const REDNESS_THRESHOLD: f64 = 15.0;

    /// Typical a* of healthy gingiva
    pub const HEALTHY_REDNESS: f64 = 10.0;

    /// Typical L* of healthy gingiva
    pub const HEALTHY_LIGHTNESS: f64 = 60.0;

    /// Swelling indicator weights
    pub const SWELLING_REDNESS_WEIGHT: f64 = 0.5;
    pub const SWELLING_DARKNESS_WEIGHT: f64 = 0.3;

    /// Caps of each inflammation score component (sum = 100)
    pub const REDNESS_SCORE_CAP: f64 = 40.0;
    pub const PERCENTAGE_SCORE_CAP: f64 = 30.0;
    pub const SWELLING_SCORE_CAP: f64 = 30.0;

    /// Mean a* at which the redness component saturates
    pub const REDNESS_SATURATION: f64 = 20.0;

    /// Swelling indicator value at which its component saturates
    pub const SWELLING_SATURATION: f64 = 10.0;

    /// Status thresholds on mean a*
    pub const MILD_REDNESS: f64 = 15.0;
    pub const MODERATE_REDNESS: f64 = 20.0;
    pub const SEVERE_REDNESS: f64 = 25.0;

    /// Status thresholds on inflammation score
    pub const MILD_SCORE: f64 = 30.0;
    pub const MODERATE_SCORE: f64 = 50.0;
    pub const SEVERE_SCORE: f64 = 70.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_e_bands_ordered() {
        assert!(delta_e::IMPERCEPTIBLE < delta_e::ACCEPTABLE);
        assert!(delta_e::ACCEPTABLE < delta_e::CLINICALLY_UNACCEPTABLE);
        assert_eq!(delta_e::POW25_7, 25f64.powi(7));
    }

    #[test]
    fn test_gum_score_caps_sum_to_hundred() {
        let total = gum::REDNESS_SCORE_CAP + gum::PERCENTAGE_SCORE_CAP + gum::SWELLING_SCORE_CAP;
        assert!((total - 100.0).abs() < 1e-9);
        assert!(gum::MILD_REDNESS < gum::MODERATE_REDNESS);
        assert!(gum::MODERATE_REDNESS < gum::SEVERE_REDNESS);
        assert!(gum::MILD_SCORE < gum::MODERATE_SCORE);
        assert!(gum::MODERATE_SCORE < gum::SEVERE_SCORE);
    }

    #[test]
    fn test_planning_levels_increase() {
        assert!(planning::SUBTLE_STEPS < planning::MODERATE_STEPS);
        assert!(planning::MODERATE_STEPS < planning::DRAMATIC_STEPS);
    }
}
