//! Configuration structures for the diagnostics engine.
//!
//! This module defines the tunable parameters for matching, planning and gum
//! analysis, grouped by the stage that consumes them.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use dental_shade::EngineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = EngineConfig::from_json_file(Path::new("engine.json"))?;
//!
//! // Or use defaults
//! let config = EngineConfig::default();
//! # Ok::<(), dental_shade::DiagnosticsError>(())
//! ```
//!
//! Every section carries `#[serde(default)]`, so a file only needs the values
//! it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::DeltaEWeights;
use crate::constants::{delta_e, gum, planning};
use crate::{DiagnosticsError, Result};

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub matching: MatchingConfig,
    pub planning: PlanningConfig,
    pub gum: GumConfig,
}

/// Shade matching parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// CIEDE2000 parametric weights
    pub weights: DeltaEWeights,

    /// Skip bleached shades when matching a patient's current teeth
    pub exclude_bleached_for_current: bool,

    /// Runner-up shades to report (at most 3)
    pub alternatives: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: DeltaEWeights::default(),
            exclude_bleached_for_current: true,
            alternatives: delta_e::MAX_ALTERNATIVES,
        }
    }
}

/// Whitening plan parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Plans needing more steps than this are unrealistic
    pub realistic_step_limit: usize,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            realistic_step_limit: planning::REALISTIC_STEP_LIMIT,
        }
    }
}

/// Gum analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GumConfig {
    /// a* above which a pixel counts as red
    pub redness_threshold: f64,

    /// Baseline a* of healthy gingiva
    pub healthy_redness: f64,

    /// Baseline L* of healthy gingiva
    pub healthy_lightness: f64,
}

impl Default for GumConfig {
    fn default() -> Self {
        Self {
            redness_threshold: gum::REDNESS_THRESHOLD,
            healthy_redness: gum::HEALTHY_REDNESS,
            healthy_lightness: gum::HEALTHY_LIGHTNESS,
        }
    }
}

impl EngineConfig {
    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DiagnosticsError::serialization("invalid engine configuration", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DiagnosticsError::config(format!("cannot read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DiagnosticsError::serialization("cannot encode engine configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            DiagnosticsError::config(format!("cannot write {}", path.display()), e)
        })
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let weights = &self.matching.weights;
        for (name, value) in [("k_l", weights.k_l), ("k_c", weights.k_c), ("k_h", weights.k_h)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DiagnosticsError::invalid_parameter(
                    format!("matching.weights.{}", name),
                    value,
                ));
            }
        }

        if self.matching.alternatives > delta_e::MAX_ALTERNATIVES {
            return Err(DiagnosticsError::invalid_parameter(
                "matching.alternatives",
                self.matching.alternatives,
            ));
        }

        for (name, value) in [
            ("gum.redness_threshold", self.gum.redness_threshold),
            ("gum.healthy_redness", self.gum.healthy_redness),
            ("gum.healthy_lightness", self.gum.healthy_lightness),
        ] {
            if !value.is_finite() {
                return Err(DiagnosticsError::invalid_parameter(name, value));
            }
        }

        Ok(())
    }
}
