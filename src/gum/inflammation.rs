//! Gum inflammation detection and classification
//!
//! Redness is read from the a* channel of a gum-region pixel sample:
//! - Mean and population standard deviation of a*
//! - Share of pixels above a fixed redness threshold
//! - Swelling indicator combining raised redness with lowered lightness
//!
//! A bounded 0-100 inflammation score and a four-level status are then
//! derived from those metrics.
//!
//! Algorithm tag: `algo-gum-inflammation`

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::LabColor;
use crate::config::GumConfig;
use crate::constants::gum::{
    HEALTHY_LIGHTNESS, HEALTHY_REDNESS, MILD_REDNESS, MILD_SCORE, MODERATE_REDNESS,
    MODERATE_SCORE, PERCENTAGE_SCORE_CAP, REDNESS_SATURATION, REDNESS_SCORE_CAP,
    REDNESS_THRESHOLD, SEVERE_REDNESS, SEVERE_SCORE, SWELLING_DARKNESS_WEIGHT,
    SWELLING_REDNESS_WEIGHT, SWELLING_SATURATION, SWELLING_SCORE_CAP,
};

/// Redness statistics of a gum sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GumHealthMetrics {
    /// Mean a*
    pub mean_redness: f64,
    /// Population standard deviation of a*
    pub std_redness: f64,
    /// Percentage (0-100) of pixels above the redness threshold
    pub redness_percentage: f64,
    /// Non-negative swelling indicator
    pub swelling_indicator: f64,
}

/// Gum status, least severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GumStatus {
    Healthy,
    MildInflammation,
    ModerateInflammation,
    SevereInflammation,
}

impl GumStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GumStatus::Healthy => "healthy",
            GumStatus::MildInflammation => "mild inflammation",
            GumStatus::ModerateInflammation => "moderate inflammation",
            GumStatus::SevereInflammation => "severe inflammation",
        }
    }

    pub fn needs_clinical_visit(&self) -> bool {
        matches!(
            self,
            GumStatus::ModerateInflammation | GumStatus::SevereInflammation
        )
    }

    /// Classification confidence; lower for more severe findings
    pub fn confidence(&self) -> f64 {
        match self {
            GumStatus::Healthy => 0.90,
            GumStatus::MildInflammation => 0.85,
            GumStatus::ModerateInflammation => 0.80,
            GumStatus::SevereInflammation => 0.75,
        }
    }
}

/// Output of [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflammationClassification {
    pub status: GumStatus,
    /// 0-100
    pub inflammation_score: f64,
    pub needs_clinical_visit: bool,
    pub confidence: f64,
}

/// Severity of one affected region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionSeverity {
    Mild,
    Moderate,
    Severe,
}

/// A gum region estimated to be inflamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedRegion {
    pub name: String,
    pub severity: RegionSeverity,
}

/// Complete gum health assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GumHealthResult {
    pub status: GumStatus,
    pub inflammation_score: f64,
    pub needs_clinical_visit: bool,
    pub confidence: f64,
    pub metrics: GumHealthMetrics,
    pub affected_regions: Vec<AffectedRegion>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

/// Regions in order of onset: mean a* above which each is reported
const REGION_THRESHOLDS: [(&str, f64, RegionSeverity); 4] = [
    ("Upper front gumline", 12.0, RegionSeverity::Mild),
    ("Lower front gumline", 16.0, RegionSeverity::Moderate),
    ("Interdental papillae", 20.0, RegionSeverity::Moderate),
    ("Molar gumline", 25.0, RegionSeverity::Severe),
];

/// Gum inflammation analyzer
pub struct InflammationAnalyzer {
    redness_threshold: f64,
    healthy_redness: f64,
    healthy_lightness: f64,
}

impl Default for InflammationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl InflammationAnalyzer {
    /// Create an analyzer with default parameters
    pub fn new() -> Self {
        Self {
            redness_threshold: REDNESS_THRESHOLD,
            healthy_redness: HEALTHY_REDNESS,
            healthy_lightness: HEALTHY_LIGHTNESS,
        }
    }

    /// Create an analyzer with custom parameters
    pub fn with_params(
        redness_threshold: f64,
        healthy_redness: f64,
        healthy_lightness: f64,
    ) -> Self {
        Self {
            redness_threshold,
            healthy_redness,
            healthy_lightness,
        }
    }

    pub fn from_config(config: &GumConfig) -> Self {
        Self::with_params(
            config.redness_threshold,
            config.healthy_redness,
            config.healthy_lightness,
        )
    }

    /// Compute redness metrics over a gum pixel sample
    ///
    /// An empty sample yields all-zero metrics.
    ///
    /// # Arguments
    ///
    /// * `pixels` - Lab colors sampled from the gum region
    ///
    /// # Returns
    ///
    /// Mean and spread of a*, share of pixels above the redness threshold
    /// and a swelling indicator
    pub fn detect_inflammation(&self, pixels: &[LabColor]) -> GumHealthMetrics {
        if pixels.is_empty() {
            return GumHealthMetrics::default();
        }

        let n = pixels.len() as f64;
        let mean_redness = pixels.iter().map(|p| p.a).sum::<f64>() / n;
        let mean_lightness = pixels.iter().map(|p| p.l).sum::<f64>() / n;

        let variance = pixels
            .iter()
            .map(|p| (p.a - mean_redness).powi(2))
            .sum::<f64>()
            / n;

        let red_count = pixels
            .iter()
            .filter(|p| p.a > self.redness_threshold)
            .count();

        let swelling_indicator = ((mean_redness - self.healthy_redness) * SWELLING_REDNESS_WEIGHT
            + (self.healthy_lightness - mean_lightness) * SWELLING_DARKNESS_WEIGHT)
            .max(0.0);

        let metrics = GumHealthMetrics {
            mean_redness,
            std_redness: variance.sqrt(),
            redness_percentage: red_count as f64 / n * 100.0,
            swelling_indicator,
        };

        debug!(
            pixels = pixels.len(),
            mean_redness = metrics.mean_redness,
            redness_percentage = metrics.redness_percentage,
            swelling = metrics.swelling_indicator,
            "gum metrics computed"
        );

        metrics
    }

    /// Full assessment: metrics, classification, regions and advice
    pub fn assess(&self, pixels: &[LabColor]) -> GumHealthResult {
        let metrics = self.detect_inflammation(pixels);
        build_result(metrics, classify(&metrics))
    }
}

/// [`InflammationAnalyzer::detect_inflammation`] with default parameters
pub fn detect_inflammation(pixels: &[LabColor]) -> GumHealthMetrics {
    InflammationAnalyzer::new().detect_inflammation(pixels)
}

/// [`InflammationAnalyzer::assess`] with default parameters
pub fn assess_gum_health(pixels: &[LabColor]) -> GumHealthResult {
    InflammationAnalyzer::new().assess(pixels)
}

/// Weighted inflammation score, 0-100
///
/// Mean redness contributes up to 40, the red-pixel percentage up to 30 and
/// swelling up to 30. Every component is non-decreasing in its input.
pub fn inflammation_score(metrics: &GumHealthMetrics) -> f64 {
    let redness = (metrics.mean_redness.max(0.0) / REDNESS_SATURATION * REDNESS_SCORE_CAP)
        .min(REDNESS_SCORE_CAP);
    let percentage = (metrics.redness_percentage.max(0.0) / 100.0 * PERCENTAGE_SCORE_CAP)
        .min(PERCENTAGE_SCORE_CAP);
    let swelling = (metrics.swelling_indicator.max(0.0) / SWELLING_SATURATION
        * SWELLING_SCORE_CAP)
        .min(SWELLING_SCORE_CAP);

    (redness + percentage + swelling).clamp(0.0, 100.0)
}

/// Classify metrics into a status with score and confidence
pub fn classify(metrics: &GumHealthMetrics) -> InflammationClassification {
    let score = inflammation_score(metrics);
    let redness = metrics.mean_redness;

    let status = if redness >= SEVERE_REDNESS || score >= SEVERE_SCORE {
        GumStatus::SevereInflammation
    } else if redness >= MODERATE_REDNESS || score >= MODERATE_SCORE {
        GumStatus::ModerateInflammation
    } else if redness >= MILD_REDNESS || score >= MILD_SCORE {
        GumStatus::MildInflammation
    } else {
        GumStatus::Healthy
    };

    debug!(status = status.label(), score, "gum status classified");

    InflammationClassification {
        status,
        inflammation_score: score,
        needs_clinical_visit: status.needs_clinical_visit(),
        confidence: status.confidence(),
    }
}

/// Care recommendations for a status
pub fn recommendations(status: GumStatus) -> &'static [&'static str] {
    match status {
        GumStatus::Healthy => &[
            "Keep brushing twice a day with a soft-bristled brush",
            "Floss daily to keep the gumline clean",
            "Continue regular dental check-ups every six months",
        ],
        GumStatus::MildInflammation => &[
            "Brush gently along the gumline at a 45-degree angle",
            "Add daily flossing or interdental brushes",
            "Use an antibacterial mouthwash for two weeks",
            "Re-check in two weeks; see a dentist if redness persists",
        ],
        GumStatus::ModerateInflammation => &[
            "Book a dental appointment within the next few weeks",
            "Use an antibacterial mouthwash twice a day",
            "Floss carefully every day even if the gums bleed a little",
            "Avoid tobacco and limit sugary snacks",
        ],
        GumStatus::SevereInflammation => &[
            "See a dentist or periodontist as soon as possible",
            "Do not ignore bleeding, swelling or pain in the gums",
            "Keep brushing gently; do not stop cleaning inflamed areas",
            "Avoid tobacco and alcohol-based mouthwashes until examined",
        ],
    }
}

/// Estimate inflamed regions from mean redness
///
/// Zero to four regions, each added at a higher redness level with an
/// equal or higher severity than the one before.
pub fn affected_regions(mean_redness: f64) -> Vec<AffectedRegion> {
    REGION_THRESHOLDS
        .iter()
        .filter(|(_, threshold, _)| mean_redness > *threshold)
        .map(|(name, _, severity)| AffectedRegion {
            name: (*name).to_string(),
            severity: *severity,
        })
        .collect()
}

/// Assemble a result from metrics and a classification
pub(crate) fn build_result(
    metrics: GumHealthMetrics,
    classification: InflammationClassification,
) -> GumHealthResult {
    let affected_regions = affected_regions(metrics.mean_redness);
    let summary = summarize(
        classification.status,
        classification.inflammation_score,
        affected_regions.len(),
    );

    GumHealthResult {
        status: classification.status,
        inflammation_score: classification.inflammation_score,
        needs_clinical_visit: classification.needs_clinical_visit,
        confidence: classification.confidence,
        metrics,
        affected_regions,
        recommendations: recommendations(classification.status)
            .iter()
            .map(|line| (*line).to_string())
            .collect(),
        summary,
    }
}

fn summarize(status: GumStatus, score: f64, region_count: usize) -> String {
    let mut summary = match status {
        GumStatus::Healthy => format!("Gums look healthy (score {:.0}/100)", score),
        _ => format!(
            "Signs of {} (score {:.0}/100) in {} region{}",
            status.label(),
            score,
            region_count,
            if region_count == 1 { "" } else { "s" }
        ),
    };
    if status.needs_clinical_visit() {
        summary.push_str("; a dental visit is recommended");
    }
    summary
}
