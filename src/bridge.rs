//! Normalization of externally classified results
//!
//! An external vision service may report a shade code or a gum status
//! directly. These reports are turned into the same [`ToothColorResult`] and
//! [`GumHealthResult`] shapes the internal pipeline produces, after which the
//! rest of the engine does not distinguish the two sources.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::ToothColorResult;
use crate::color::{difference, match_confidence, DeltaEBand, DeltaEWeights, LabColor};
use crate::constants::delta_e::MAX_ALTERNATIVES;
use crate::gum::inflammation::build_result;
use crate::gum::{GumHealthMetrics, GumHealthResult, GumStatus, InflammationClassification};
use crate::shade::{rank_shades, MatchResult, Shade};
use crate::{DiagnosticsError, Result};

/// Shade judgment reported by an external vision service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalShadeReport {
    /// Catalog code, e.g. `"A2"`
    pub shade_code: String,
    /// Service confidence, 0.0-1.0
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Lab value the service measured, if it reports one
    #[serde(default)]
    pub measured_lab: Option<LabColor>,
}

/// Gum judgment reported by an external vision service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalGumReport {
    pub status: GumStatus,
    /// 0-100
    pub inflammation_score: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub metrics: Option<GumHealthMetrics>,
}

impl ExternalShadeReport {
    /// Reject non-finite confidence or Lab components
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the offending field
    pub fn validate(&self) -> Result<()> {
        check_confidence(self.confidence)?;
        if let Some(lab) = self.measured_lab {
            for (name, value) in [("l", lab.l), ("a", lab.a), ("b", lab.b)] {
                if !value.is_finite() {
                    return Err(DiagnosticsError::invalid_parameter(
                        format!("measured_lab.{}", name),
                        value,
                    ));
                }
            }
        }
        Ok(())
    }
}

impl ExternalGumReport {
    /// Reject non-finite score, confidence or metrics
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the offending field
    pub fn validate(&self) -> Result<()> {
        if !self.inflammation_score.is_finite() {
            return Err(DiagnosticsError::invalid_parameter(
                "inflammation_score",
                self.inflammation_score,
            ));
        }
        check_confidence(self.confidence)?;
        if let Some(metrics) = self.metrics {
            for (name, value) in [
                ("mean_redness", metrics.mean_redness),
                ("std_redness", metrics.std_redness),
                ("redness_percentage", metrics.redness_percentage),
                ("swelling_indicator", metrics.swelling_indicator),
            ] {
                if !value.is_finite() {
                    return Err(DiagnosticsError::invalid_parameter(
                        format!("metrics.{}", name),
                        value,
                    ));
                }
            }
        }
        Ok(())
    }
}

fn check_confidence(confidence: Option<f64>) -> Result<()> {
    match confidence {
        Some(value) if !value.is_finite() => {
            Err(DiagnosticsError::invalid_parameter("confidence", value))
        }
        _ => Ok(()),
    }
}

/// Normalize an external shade judgment into a tooth result
///
/// Without a measured Lab value the catalog reference stands in for it and
/// ΔE is 0. Alternatives are the reported shade's nearest catalog neighbours.
///
/// # Errors
///
/// Returns `UnknownShade` if the reported code is not in the catalog and
/// `InvalidParameter` for non-finite values
pub fn normalize_shade_report(
    report: &ExternalShadeReport,
    weights: DeltaEWeights,
) -> Result<ToothColorResult> {
    report.validate()?;
    let shade = Shade::from_code(&report.shade_code)?;
    let measured = report.measured_lab.unwrap_or(shade.reference_lab());
    let delta_e = difference(measured, shade.reference_lab(), weights);

    let others: Vec<Shade> = Shade::ALL
        .iter()
        .copied()
        .filter(|candidate| *candidate != shade)
        .collect();
    let alternatives = rank_shades(measured, &others, weights)
        .into_iter()
        .take(MAX_ALTERNATIVES)
        .collect();

    let confidence = report
        .confidence
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or_else(|| match_confidence(delta_e));

    debug!(%shade, delta_e, confidence, "normalized external shade report");

    let shade_match = MatchResult {
        shade,
        delta_e,
        band: DeltaEBand::classify(delta_e),
        alternatives,
    };

    Ok(ToothColorResult::new(measured, shade_match, confidence))
}

/// Normalize an external gum judgment into a gum result
///
/// The clinical-visit flag, recommendations and regions are re-derived from
/// the reported status and metrics. Missing metrics count as all-zero, so no
/// regions are estimated.
///
/// # Errors
///
/// Returns `InvalidParameter` for a non-finite score, confidence or metric
pub fn normalize_gum_report(report: &ExternalGumReport) -> Result<GumHealthResult> {
    report.validate()?;

    let classification = InflammationClassification {
        status: report.status,
        inflammation_score: report.inflammation_score.clamp(0.0, 100.0),
        needs_clinical_visit: report.status.needs_clinical_visit(),
        confidence: report
            .confidence
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or_else(|| report.status.confidence()),
    };

    debug!(status = report.status.label(), "normalized external gum report");

    Ok(build_result(report.metrics.unwrap_or_default(), classification))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_report_without_lab() {
        let report = ExternalShadeReport {
            shade_code: "A2".into(),
            confidence: None,
            measured_lab: None,
        };
        let result = normalize_shade_report(&report, DeltaEWeights::default()).unwrap();
        assert_eq!(result.shade_match.shade, Shade::A2);
        assert_eq!(result.shade_match.delta_e, 0.0);
        assert_eq!(result.shade_match.alternatives.len(), 3);
        assert!(result.shade_match.alternatives.iter().all(|a| a.shade != Shade::A2));
        assert_eq!(result.confidence, 0.95);
    }

    #[test]
    fn test_shade_report_keeps_service_confidence() {
        let report = ExternalShadeReport {
            shade_code: "B1".into(),
            confidence: Some(1.4),
            measured_lab: Some(LabColor::new(86.0, 0.0, 13.0)),
        };
        let result = normalize_shade_report(&report, DeltaEWeights::default()).unwrap();
        assert_eq!(result.confidence, 1.0);
        assert!(result.shade_match.delta_e > 0.0);
        assert_eq!(result.measured_lab, LabColor::new(86.0, 0.0, 13.0));
    }

    #[test]
    fn test_unknown_shade_code() {
        let report = ExternalShadeReport {
            shade_code: "E7".into(),
            confidence: None,
            measured_lab: None,
        };
        assert!(matches!(
            normalize_shade_report(&report, DeltaEWeights::default()),
            Err(DiagnosticsError::UnknownShade { .. })
        ));
    }

    #[test]
    fn test_gum_report_rederives_fields() {
        let report = ExternalGumReport {
            status: GumStatus::ModerateInflammation,
            inflammation_score: 140.0,
            confidence: None,
            metrics: Some(GumHealthMetrics {
                mean_redness: 21.0,
                std_redness: 3.0,
                redness_percentage: 70.0,
                swelling_indicator: 6.0,
            }),
        };
        let result = normalize_gum_report(&report).unwrap();
        assert!(result.needs_clinical_visit);
        assert_eq!(result.inflammation_score, 100.0);
        assert_eq!(result.confidence, 0.80);
        assert_eq!(result.affected_regions.len(), 3);
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn test_gum_report_without_metrics() {
        let report = ExternalGumReport {
            status: GumStatus::MildInflammation,
            inflammation_score: 35.0,
            confidence: Some(0.6),
            metrics: None,
        };
        let result = normalize_gum_report(&report).unwrap();
        assert_eq!(result.metrics, GumHealthMetrics::default());
        assert!(result.affected_regions.is_empty());
        assert!(!result.needs_clinical_visit);
        assert_eq!(result.confidence, 0.6);
    }

    #[test]
    fn test_gum_report_rejects_nan_score() {
        let report = ExternalGumReport {
            status: GumStatus::Healthy,
            inflammation_score: f64::NAN,
            confidence: None,
            metrics: None,
        };
        assert!(normalize_gum_report(&report).is_err());
    }

    #[test]
    fn test_non_finite_confidence_is_rejected() {
        let shade = ExternalShadeReport {
            shade_code: "A2".into(),
            confidence: Some(f64::NAN),
            measured_lab: None,
        };
        assert!(matches!(
            normalize_shade_report(&shade, DeltaEWeights::default()),
            Err(DiagnosticsError::InvalidParameter { .. })
        ));

        let gum = ExternalGumReport {
            status: GumStatus::Healthy,
            inflammation_score: 5.0,
            confidence: Some(f64::INFINITY),
            metrics: None,
        };
        assert!(normalize_gum_report(&gum).is_err());
    }

    #[test]
    fn test_non_finite_lab_and_metrics_are_rejected() {
        let shade = ExternalShadeReport {
            shade_code: "B2".into(),
            confidence: None,
            measured_lab: Some(LabColor::new(80.0, f64::NAN, 18.0)),
        };
        assert!(shade.validate().is_err());

        let gum = ExternalGumReport {
            status: GumStatus::MildInflammation,
            inflammation_score: 35.0,
            confidence: None,
            metrics: Some(GumHealthMetrics {
                mean_redness: f64::NAN,
                ..GumHealthMetrics::default()
            }),
        };
        assert!(gum.validate().is_err());
    }

    #[test]
    fn test_report_deserializes_from_service_json() {
        let json = r#"{"shade_code": "A3.5", "confidence": 0.7}"#;
        let report: ExternalShadeReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.shade_code, "A3.5");
        assert!(report.measured_lab.is_none());
    }
}
