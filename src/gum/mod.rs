//! Gum health analysis module
//!
//! Statistical redness analysis of gum-region pixel samples in Lab space.

pub mod inflammation;

pub use inflammation::{
    affected_regions, assess_gum_health, classify, detect_inflammation, inflammation_score,
    recommendations, AffectedRegion, GumHealthMetrics, GumHealthResult, GumStatus,
    InflammationAnalyzer, InflammationClassification, RegionSeverity,
};
