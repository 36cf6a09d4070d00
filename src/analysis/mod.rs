//! Analysis entry points
//!
//! An analysis input is either raw pixel samples, measured internally, or a
//! judgment already made by an external vision service. The source is
//! resolved once here; downstream code only sees normalized results.
//!
//! Results are memoized in a caller-owned single-slot [`AnalysisCache`]
//! keyed by a fingerprint of the input.

pub mod cache;
pub mod tooth;

pub use cache::{AnalysisCache, Fingerprint};
pub use tooth::{ToothAnalyzer, ToothColorResult};

use serde::Serialize;
use tracing::debug;

use crate::bridge::{
    normalize_gum_report, normalize_shade_report, ExternalGumReport, ExternalShadeReport,
};
use crate::color::{ColorConverter, RgbColor};
use crate::config::EngineConfig;
use crate::gum::{GumHealthResult, InflammationAnalyzer};
use crate::shade::Shade;
use crate::whitening::{
    track_progress, DesiredLevel, ProgressReport, Season, WhiteningGoalResult, WhiteningPlanner,
};
use crate::{DiagnosticsError, Result};

/// Where an analysis input comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisSource<R> {
    /// Already classified by an external service
    External(R),
    /// Raw sRGB samples from the region of interest
    Internal(Vec<RgbColor>),
}

impl<R: Serialize> AnalysisSource<R> {
    /// Fingerprint identifying this input analyzed under `settings`
    ///
    /// The settings are part of the key, so a cache shared across
    /// configurations never serves a result computed under other settings.
    pub fn fingerprint<S: Serialize>(&self, settings: &S) -> Result<Fingerprint> {
        let settings = serde_json::to_vec(settings).map_err(|e| {
            DiagnosticsError::serialization("cannot fingerprint analysis settings", e)
        })?;

        match self {
            AnalysisSource::External(report) => {
                let bytes = serde_json::to_vec(report).map_err(|e| {
                    DiagnosticsError::serialization("cannot fingerprint external report", e)
                })?;
                Ok(Fingerprint::of_parts(
                    "external",
                    &[settings.as_slice(), bytes.as_slice()],
                ))
            }
            AnalysisSource::Internal(samples) => {
                let bytes: Vec<u8> = samples.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
                Ok(Fingerprint::of_parts(
                    "internal",
                    &[settings.as_slice(), bytes.as_slice()],
                ))
            }
        }
    }
}

/// Analyze tooth color from either source, memoized in `cache`
///
/// The cache key covers the input and the matching settings. Reports with
/// non-finite values and invalid configurations are rejected before lookup.
pub fn analyze_tooth_color(
    source: &AnalysisSource<ExternalShadeReport>,
    config: &EngineConfig,
    cache: &mut AnalysisCache<ToothColorResult>,
) -> Result<ToothColorResult> {
    config.validate()?;
    if let AnalysisSource::External(report) = source {
        report.validate()?;
    }
    let fingerprint = source.fingerprint(&config.matching)?;
    debug!(%fingerprint, "tooth color analysis requested");

    cache
        .get_or_try_insert_with(fingerprint, || match source {
            AnalysisSource::External(report) => {
                normalize_shade_report(report, config.matching.weights)
            }
            AnalysisSource::Internal(samples) => {
                ToothAnalyzer::from_config(&config.matching).analyze(samples)
            }
        })
        .cloned()
}

/// Analyze gum health from either source, memoized in `cache`
///
/// An internal source with no samples yields the healthy all-zero result.
/// The cache key covers the input and the gum settings.
pub fn analyze_gum_health(
    source: &AnalysisSource<ExternalGumReport>,
    config: &EngineConfig,
    cache: &mut AnalysisCache<GumHealthResult>,
) -> Result<GumHealthResult> {
    config.validate()?;
    if let AnalysisSource::External(report) = source {
        report.validate()?;
    }
    let fingerprint = source.fingerprint(&config.gum)?;
    debug!(%fingerprint, "gum health analysis requested");

    cache
        .get_or_try_insert_with(fingerprint, || match source {
            AnalysisSource::External(report) => normalize_gum_report(report),
            AnalysisSource::Internal(samples) => {
                let pixels = ColorConverter::new().rgb_slice_to_lab(samples);
                Ok(InflammationAnalyzer::from_config(&config.gum).assess(&pixels))
            }
        })
        .cloned()
}

/// One patient's analysis session
///
/// Owns the configuration and the result caches. Call
/// [`DiagnosticsSession::reset`] before analyzing an unrelated patient.
pub struct DiagnosticsSession {
    config: EngineConfig,
    tooth_cache: AnalysisCache<ToothColorResult>,
    gum_cache: AnalysisCache<GumHealthResult>,
}

impl Default for DiagnosticsSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DiagnosticsSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            tooth_cache: AnalysisCache::new(),
            gum_cache: AnalysisCache::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn analyze_tooth(
        &mut self,
        source: &AnalysisSource<ExternalShadeReport>,
    ) -> Result<ToothColorResult> {
        analyze_tooth_color(source, &self.config, &mut self.tooth_cache)
    }

    pub fn analyze_gum(
        &mut self,
        source: &AnalysisSource<ExternalGumReport>,
    ) -> Result<GumHealthResult> {
        analyze_gum_health(source, &self.config, &mut self.gum_cache)
    }

    /// Whitening plan using the session's planning settings
    pub fn plan_whitening(
        &self,
        current: Shade,
        season: Season,
        level: DesiredLevel,
    ) -> WhiteningGoalResult {
        WhiteningPlanner::from_config(&self.config.planning)
            .calculate_whitening_goal(current, season, level)
    }

    pub fn track_progress(&self, start: Shade, current: Shade, target: Shade) -> ProgressReport {
        track_progress(start, current, target)
    }

    /// Forget cached results before an unrelated analysis
    pub fn reset(&mut self) {
        debug!("diagnostics session reset");
        self.tooth_cache.invalidate();
        self.gum_cache.invalidate();
    }

    pub fn tooth_cache(&self) -> &AnalysisCache<ToothColorResult> {
        &self.tooth_cache
    }

    pub fn gum_cache(&self) -> &AnalysisCache<GumHealthResult> {
        &self.gum_cache
    }
}
