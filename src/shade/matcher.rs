//! Nearest-shade search and brightness step arithmetic
//!
//! Algorithm tag: `algo-shade-nearest-match`

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{Shade, CATALOG};
use crate::color::{difference, DeltaEBand, DeltaEWeights, LabColor};
use crate::constants::delta_e::MAX_ALTERNATIVES;
use crate::{DiagnosticsError, Result};

/// A shade together with its distance from the measured color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadeDistance {
    pub shade: Shade,
    pub delta_e: f64,
}

/// Result of matching a measured color against the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Closest shade
    pub shade: Shade,
    /// CIEDE2000 distance to the closest shade
    pub delta_e: f64,
    /// Perceptual band of `delta_e`
    pub band: DeltaEBand,
    /// Next closest shades, nearest first, at most three
    pub alternatives: Vec<ShadeDistance>,
}

/// Find the closest catalog shade with reference weights
///
/// With `exclude_bleached` the three bleached classes are skipped, which is
/// what analysis of a patient's *current* teeth wants.
///
/// # Arguments
///
/// * `measured` - Lab color of the tooth sample
/// * `exclude_bleached` - skip `0M1`, `0M2` and `0M3`
///
/// # Returns
///
/// Nearest shade with its ΔE, band and up to three alternatives
pub fn find_best_match(measured: LabColor, exclude_bleached: bool) -> MatchResult {
    find_best_match_with(measured, exclude_bleached, DeltaEWeights::default())
}

/// Find the closest catalog shade with explicit CIEDE2000 weights
pub fn find_best_match_with(
    measured: LabColor,
    exclude_bleached: bool,
    weights: DeltaEWeights,
) -> MatchResult {
    let candidates: Vec<Shade> = CATALOG
        .iter()
        .filter(|reference| !(exclude_bleached && reference.shade.is_bleached()))
        .map(|reference| reference.shade)
        .collect();

    // The natural shades alone are never empty
    match match_among(measured, &candidates, weights, MAX_ALTERNATIVES) {
        Ok(result) => result,
        Err(_) => unreachable!("catalog always has natural shades"),
    }
}

/// Find the closest shade among an explicit candidate set
///
/// `max_alternatives` is capped at three.
///
/// # Errors
///
/// Returns `EmptyCatalogSelection` when `candidates` is empty
pub fn match_among(
    measured: LabColor,
    candidates: &[Shade],
    weights: DeltaEWeights,
    max_alternatives: usize,
) -> Result<MatchResult> {
    let mut ranked = rank_shades(measured, candidates, weights).into_iter();
    let best = ranked.next().ok_or(DiagnosticsError::EmptyCatalogSelection)?;
    let alternatives: Vec<ShadeDistance> = ranked
        .take(max_alternatives.min(MAX_ALTERNATIVES))
        .collect();

    debug!(
        measured = %measured,
        shade = %best.shade,
        delta_e = best.delta_e,
        candidates = candidates.len(),
        "matched shade"
    );

    Ok(MatchResult {
        shade: best.shade,
        delta_e: best.delta_e,
        band: DeltaEBand::classify(best.delta_e),
        alternatives,
    })
}

/// Every candidate with its ΔE00 to `measured`, nearest first
///
/// The sort is stable, so equal distances keep the caller's order.
pub fn rank_shades(
    measured: LabColor,
    candidates: &[Shade],
    weights: DeltaEWeights,
) -> Vec<ShadeDistance> {
    let mut ranked: Vec<ShadeDistance> = candidates
        .iter()
        .map(|shade| ShadeDistance {
            shade: *shade,
            delta_e: difference(measured, shade.reference_lab(), weights),
        })
        .collect();

    ranked.sort_by(|x, y| x.delta_e.total_cmp(&y.delta_e));
    ranked
}

/// Ordinal brightness steps from `from` to `to`
///
/// Positive when `to` is brighter than `from`. Antisymmetric:
/// `step_difference(a, b) == -step_difference(b, a)`.
pub fn step_difference(from: Shade, to: Shade) -> i32 {
    from.brightness_rank() as i32 - to.brightness_rank() as i32
}

/// [`step_difference`] for raw catalog codes
///
/// # Errors
///
/// Returns `UnknownShade` if either code is not in the catalog
pub fn step_difference_codes(from: &str, to: &str) -> Result<i32> {
    Ok(step_difference(Shade::from_code(from)?, Shade::from_code(to)?))
}
