//! Tooth color measurement
//!
//! Collapses a tooth region-of-interest sample to one Lab value and matches
//! it against the shade catalog.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{match_confidence, ColorConverter, LabColor, RgbColor};
use crate::config::MatchingConfig;
use crate::shade::{match_among, MatchResult, Shade};
use crate::{DiagnosticsError, Result};

/// Tooth color analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToothColorResult {
    /// Representative Lab value of the sample
    pub measured_lab: LabColor,
    /// Display color of `measured_lab`
    pub hex: String,
    pub shade_match: MatchResult,
    /// 0.0-1.0, derived from the match distance
    pub confidence: f64,
    pub summary: String,
}

impl ToothColorResult {
    pub(crate) fn new(measured_lab: LabColor, shade_match: MatchResult, confidence: f64) -> Self {
        let summary = format!(
            "Closest shade {} (ΔE {:.1}, {})",
            shade_match.shade,
            shade_match.delta_e,
            shade_match.band.label()
        );

        Self {
            measured_lab,
            hex: ColorConverter::new().lab_to_hex(measured_lab),
            shade_match,
            confidence,
            summary,
        }
    }
}

/// Tooth shade analyzer
pub struct ToothAnalyzer {
    converter: ColorConverter,
    config: MatchingConfig,
}

impl Default for ToothAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ToothAnalyzer {
    /// Create an analyzer with default matching parameters
    pub fn new() -> Self {
        Self::from_config(&MatchingConfig::default())
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self {
            converter: ColorConverter::new(),
            config: config.clone(),
        }
    }

    /// Match the average color of a tooth sample against the catalog
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an empty sample
    pub fn analyze(&self, samples: &[RgbColor]) -> Result<ToothColorResult> {
        let measured = self
            .converter
            .average_lab(samples)
            .ok_or_else(|| DiagnosticsError::invalid_parameter("tooth_samples", "empty"))?;

        self.analyze_lab(measured)
    }

    /// Match an already-averaged Lab value
    pub fn analyze_lab(&self, measured: LabColor) -> Result<ToothColorResult> {
        let candidates: Vec<Shade> = Shade::ALL
            .iter()
            .copied()
            .filter(|shade| !(self.config.exclude_bleached_for_current && shade.is_bleached()))
            .collect();

        let shade_match = match_among(
            measured,
            &candidates,
            self.config.weights,
            self.config.alternatives,
        )?;
        let confidence = match_confidence(shade_match.delta_e);

        debug!(
            shade = %shade_match.shade,
            delta_e = shade_match.delta_e,
            confidence,
            "tooth color analyzed"
        );

        Ok(ToothColorResult::new(measured, shade_match, confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DeltaEBand;

    #[test]
    fn test_empty_sample_is_invalid() {
        let err = ToothAnalyzer::new().analyze(&[]).unwrap_err();
        assert!(matches!(err, DiagnosticsError::InvalidParameter { .. }));
    }

    #[test]
    fn test_reference_lab_matches_exactly() {
        let result = ToothAnalyzer::new().analyze_lab(Shade::A2.reference_lab()).unwrap();
        assert_eq!(result.shade_match.shade, Shade::A2);
        assert_eq!(result.shade_match.band, DeltaEBand::Imperceptible);
        assert_eq!(result.confidence, 0.95);
        assert!(result.summary.starts_with("Closest shade A2"));
    }

    #[test]
    fn test_current_analysis_excludes_bleached() {
        let result = ToothAnalyzer::new()
            .analyze(&[RgbColor::new(250, 250, 248)])
            .unwrap();
        assert!(!result.shade_match.shade.is_bleached());
    }

    #[test]
    fn test_bleached_allowed_when_configured() {
        let config = MatchingConfig {
            exclude_bleached_for_current: false,
            ..MatchingConfig::default()
        };
        let result = ToothAnalyzer::from_config(&config)
            .analyze_lab(Shade::Bleached1.reference_lab())
            .unwrap();
        assert_eq!(result.shade_match.shade, Shade::Bleached1);
    }

    #[test]
    fn test_alternative_count_follows_config() {
        let config = MatchingConfig {
            alternatives: 1,
            ..MatchingConfig::default()
        };
        let result = ToothAnalyzer::from_config(&config)
            .analyze_lab(LabColor::new(80.0, 1.0, 17.0))
            .unwrap();
        assert_eq!(result.shade_match.alternatives.len(), 1);
    }
}
