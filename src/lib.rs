//! # Dental Shade
//!
//! A Rust crate for colorimetric oral-health diagnostics.
//!
//! This library turns color samples into clinically meaningful results by:
//! - Converting sRGB samples to CIE Lab (D65)
//! - Matching tooth color against a fixed shade guide with CIEDE2000
//! - Planning season-aware whitening goals and tracking progress
//! - Scoring gum inflammation from redness statistics
//!
//! All operations are synchronous and deterministic. The only state is a
//! caller-owned single-slot [`AnalysisCache`].
//!
//! ## Example
//!
//! ```rust
//! use dental_shade::{
//!     calculate_whitening_goal, find_best_match, ColorConverter, DesiredLevel, RgbColor, Season,
//! };
//!
//! let converter = ColorConverter::new();
//! let lab = converter
//!     .average_lab(&[RgbColor::new(232, 218, 190), RgbColor::new(228, 214, 186)])
//!     .unwrap();
//!
//! let current = find_best_match(lab, true);
//! let plan = calculate_whitening_goal(current.shade, Season::Summer, DesiredLevel::Moderate);
//! println!("{} -> {}: {}", current.shade, plan.target_shade, plan.summary);
//! ```

pub mod analysis;
pub mod bridge;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod gum;
pub mod shade;
pub mod whitening;

pub use analysis::{
    analyze_gum_health, analyze_tooth_color, AnalysisCache, AnalysisSource, DiagnosticsSession,
    Fingerprint, ToothAnalyzer, ToothColorResult,
};
pub use bridge::{ExternalGumReport, ExternalShadeReport};
pub use color::{ciede2000, ColorConverter, DeltaEBand, DeltaEWeights, LabColor, RgbColor};
pub use config::EngineConfig;
pub use error::{DiagnosticsError, Result};
pub use gum::{
    assess_gum_health, classify, detect_inflammation, GumHealthMetrics, GumHealthResult,
    GumStatus,
};
pub use shade::{find_best_match, step_difference, MatchResult, Shade};
pub use whitening::{
    calculate_whitening_goal, is_over_whitening, recommend_target_shade, track_progress,
    DesiredLevel, ProgressReport, Season, WhiteningGoalResult,
};
