//! Season-aware whitening planning
//!
//! Harmony checks per personal color season, target and duration planning,
//! and progress tracking between analyses.

pub mod goal;
pub mod progress;
pub mod season;

pub use goal::{
    calculate_whitening_goal, estimate_duration, rank_methods, recommend_target_shade,
    DesiredLevel, DurationRange, MethodRecommendation, TargetRecommendation,
    WhiteningGoalResult, WhiteningMethod, WhiteningPlanner,
};
pub use progress::{track_progress, ProgressReport};
pub use season::{
    harmony_verdict, is_over_whitening, HarmonyVerdict, OverWhiteningCheck, Season,
    SeasonHarmonyConfig,
};
