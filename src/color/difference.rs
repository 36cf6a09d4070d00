//! CIEDE2000 perceptual color difference
//!
//! Implements the CIE Technical Report 142-2001 formula (ΔE00). Lightness,
//! chroma and hue differences are each scaled by weighting functions of the
//! pair's *mean* chroma and hue, and a rotation term `R_T` corrects the
//! chroma/hue interaction in the blue region. Because every mean is taken over
//! both colors, the result is symmetric under swapping the arguments.
//!
//! Algorithm tag: `algo-ciede2000`

#![allow(clippy::many_single_char_names)]

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::conversion::LabColor;
use crate::constants::delta_e::{
    ACCEPTABLE, CLINICALLY_UNACCEPTABLE, IMPERCEPTIBLE, POW25_7,
};

/// Parametric weighting factors `k_L`, `k_C`, `k_H`
///
/// All three are 1.0 under reference viewing conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaEWeights {
    pub k_l: f64,
    pub k_c: f64,
    pub k_h: f64,
}

impl Default for DeltaEWeights {
    fn default() -> Self {
        Self {
            k_l: 1.0,
            k_c: 1.0,
            k_h: 1.0,
        }
    }
}

/// CIEDE2000 difference with reference weights
pub fn ciede2000(lab1: LabColor, lab2: LabColor) -> f64 {
    difference(lab1, lab2, DeltaEWeights::default())
}

/// CIEDE2000 difference with explicit parametric weights
///
/// Always `≥ 0`, and exactly `0` for identical inputs.
pub fn difference(lab1: LabColor, lab2: LabColor, weights: DeltaEWeights) -> f64 {
    let LabColor { l: l1, a: a1, b: b1 } = lab1;
    let LabColor { l: l2, a: a2, b: b2 } = lab2;

    // G compensates the a* axis for low-chroma neutrals
    let c_ab_mean = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let c_ab_mean_pow7 = c_ab_mean.powi(7);
    let g = 0.5 * (1.0 - (c_ab_mean_pow7 / (c_ab_mean_pow7 + POW25_7)).sqrt());

    let a1_prime = a1 * (1.0 + g);
    let a2_prime = a2 * (1.0 + g);

    let c1_prime = a1_prime.hypot(b1);
    let c2_prime = a2_prime.hypot(b2);

    let h1_prime = hue_angle(a1_prime, b1);
    let h2_prime = hue_angle(a2_prime, b2);

    let delta_l_prime = l2 - l1;
    let delta_c_prime = c2_prime - c1_prime;

    let chroma_product = c1_prime * c2_prime;
    let delta_h_prime = if chroma_product == 0.0 {
        0.0
    } else {
        let delta_h = h2_prime - h1_prime;
        if delta_h.abs() <= 180.0 {
            delta_h
        } else if delta_h > 180.0 {
            delta_h - 360.0
        } else {
            delta_h + 360.0
        }
    };

    let delta_big_h_prime =
        2.0 * chroma_product.sqrt() * (delta_h_prime.to_radians() / 2.0).sin();

    let l_prime_mean = (l1 + l2) / 2.0;
    let c_prime_mean = (c1_prime + c2_prime) / 2.0;

    let h_prime_mean = if chroma_product == 0.0 {
        h1_prime + h2_prime
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        (h1_prime + h2_prime) / 2.0
    } else if h1_prime + h2_prime < 360.0 {
        (h1_prime + h2_prime + 360.0) / 2.0
    } else {
        (h1_prime + h2_prime - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_prime_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_prime_mean).to_radians().cos()
        + 0.32 * (3.0 * h_prime_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_prime_mean - 63.0).to_radians().cos();

    let l_offset_sq = (l_prime_mean - 50.0).powi(2);
    let s_l = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
    let s_c = 1.0 + 0.045 * c_prime_mean;
    let s_h = 1.0 + 0.015 * c_prime_mean * t;

    let delta_theta = 30.0 * (-((h_prime_mean - 275.0) / 25.0).powi(2)).exp();
    let c_prime_mean_pow7 = c_prime_mean.powi(7);
    let r_c = 2.0 * (c_prime_mean_pow7 / (c_prime_mean_pow7 + POW25_7)).sqrt();
    let r_t = -(2.0 * delta_theta * PI / 180.0).sin() * r_c;

    let term_l = delta_l_prime / (weights.k_l * s_l);
    let term_c = delta_c_prime / (weights.k_c * s_c);
    let term_h = delta_big_h_prime / (weights.k_h * s_h);

    // R_T can push tiny sums a hair below zero
    (term_l * term_l + term_c * term_c + term_h * term_h + r_t * term_c * term_h)
        .max(0.0)
        .sqrt()
}

/// Hue angle in degrees, `[0, 360)`
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// Qualitative band of a ΔE00 value in a clinical shade-matching context
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaEBand {
    /// ΔE00 < 1.0
    Imperceptible,
    /// 1.0 ≤ ΔE00 < 2.7
    PerceptibleAcceptable,
    /// 2.7 ≤ ΔE00 < 3.3
    Threshold,
    /// ΔE00 ≥ 3.3
    ClinicallyUnacceptable,
}

impl DeltaEBand {
    pub fn classify(delta_e: f64) -> Self {
        if delta_e < IMPERCEPTIBLE {
            DeltaEBand::Imperceptible
        } else if delta_e < ACCEPTABLE {
            DeltaEBand::PerceptibleAcceptable
        } else if delta_e < CLINICALLY_UNACCEPTABLE {
            DeltaEBand::Threshold
        } else {
            DeltaEBand::ClinicallyUnacceptable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeltaEBand::Imperceptible => "imperceptible",
            DeltaEBand::PerceptibleAcceptable => "perceptible but acceptable",
            DeltaEBand::Threshold => "at the acceptability threshold",
            DeltaEBand::ClinicallyUnacceptable => "clinically unacceptable",
        }
    }
}

/// Confidence (0.0-1.0) that a match at this ΔE00 names the right shade
///
/// Flat per band, then decays by 0.05 per unit beyond the clinical
/// threshold down to a floor of 0.30.
pub fn match_confidence(delta_e: f64) -> f64 {
    match DeltaEBand::classify(delta_e) {
        DeltaEBand::Imperceptible => 0.95,
        DeltaEBand::PerceptibleAcceptable => 0.85,
        DeltaEBand::Threshold => 0.70,
        DeltaEBand::ClinicallyUnacceptable => {
            (0.70 - (delta_e - CLINICALLY_UNACCEPTABLE) * 0.05).clamp(0.30, 0.70)
        }
    }
}
