//! Whitening goal planning
//!
//! Turns a current shade, a season and a desired intensity into a target
//! shade, a duration range and a ranked list of whitening methods.
//!
//! Algorithm tag: `algo-whitening-goal`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::season::{is_over_whitening, Season};
use crate::config::PlanningConfig;
use crate::constants::planning::{
    DRAMATIC_STEPS, MIN_SUITABILITY, MODERATE_STEPS, OUT_OF_BAND_PENALTY_PER_STEP,
    REALISTIC_STEP_LIMIT, SUBTLE_STEPS, WARM_SEASON_AGGRESSIVE_PENALTY,
};
use crate::shade::Shade;
use crate::{DiagnosticsError, Result};

/// How much whiter the patient wants to go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredLevel {
    Subtle,
    Moderate,
    Dramatic,
}

impl DesiredLevel {
    /// Brightness steps attempted for this level
    pub fn step_budget(&self) -> usize {
        match self {
            DesiredLevel::Subtle => SUBTLE_STEPS,
            DesiredLevel::Moderate => MODERATE_STEPS,
            DesiredLevel::Dramatic => DRAMATIC_STEPS,
        }
    }

    /// Shortest duration range quoted for a non-empty plan
    pub fn duration_floor(&self) -> DurationRange {
        match self {
            DesiredLevel::Subtle => DurationRange::new(2, 4),
            DesiredLevel::Moderate => DurationRange::new(2, 3),
            DesiredLevel::Dramatic => DurationRange::new(1, 2),
        }
    }
}

impl FromStr for DesiredLevel {
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "subtle" => Ok(DesiredLevel::Subtle),
            "moderate" => Ok(DesiredLevel::Moderate),
            "dramatic" => Ok(DesiredLevel::Dramatic),
            _ => Err(DiagnosticsError::invalid_parameter("desired_level", s)),
        }
    }
}

/// Estimated treatment duration in weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_weeks: u32,
    pub max_weeks: u32,
}

impl DurationRange {
    pub const fn new(min_weeks: u32, max_weeks: u32) -> Self {
        Self {
            min_weeks,
            max_weeks,
        }
    }
}

impl fmt::Display for DurationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_weeks == self.max_weeks {
            write!(f, "{} weeks", self.min_weeks)
        } else {
            write!(f, "{}–{} weeks", self.min_weeks, self.max_weeks)
        }
    }
}

/// Whitening method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhiteningMethod {
    Toothpaste,
    Strips,
    HomeBleaching,
    InOffice,
}

impl WhiteningMethod {
    pub const ALL: [WhiteningMethod; 4] = [
        WhiteningMethod::Toothpaste,
        WhiteningMethod::Strips,
        WhiteningMethod::HomeBleaching,
        WhiteningMethod::InOffice,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            WhiteningMethod::Toothpaste => "Whitening toothpaste",
            WhiteningMethod::Strips => "Whitening strips",
            WhiteningMethod::HomeBleaching => "Custom-tray home bleaching",
            WhiteningMethod::InOffice => "In-office whitening",
        }
    }

    /// Inclusive step-count band the method is suited to
    fn step_band(&self) -> (usize, usize) {
        match self {
            WhiteningMethod::Toothpaste => (0, 2),
            WhiteningMethod::Strips => (2, 4),
            WhiteningMethod::HomeBleaching => (3, 6),
            WhiteningMethod::InOffice => (4, usize::MAX),
        }
    }

    fn in_band_score(&self) -> u8 {
        match self {
            WhiteningMethod::Toothpaste => 90,
            WhiteningMethod::Strips => 88,
            WhiteningMethod::HomeBleaching => 85,
            WhiteningMethod::InOffice => 80,
        }
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(self, WhiteningMethod::HomeBleaching | WhiteningMethod::InOffice)
    }
}

/// A method with its suitability for a specific plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecommendation {
    pub method: WhiteningMethod,
    /// 0-100, higher is better
    pub suitability: u8,
    pub note: Option<String>,
}

/// Target shade chosen for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecommendation {
    pub current_shade: Shade,
    pub target_shade: Shade,
    pub steps_needed: usize,
    pub is_realistic: bool,
    pub warning: Option<String>,
}

/// Complete whitening plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhiteningGoalResult {
    pub current_shade: Shade,
    pub target_shade: Shade,
    pub season: Season,
    pub desired_level: DesiredLevel,
    pub steps_needed: usize,
    pub duration: DurationRange,
    pub is_realistic: bool,
    pub is_over_whitening: bool,
    pub over_whitening_reason: Option<String>,
    pub warning: Option<String>,
    /// Best method first
    pub methods: Vec<MethodRecommendation>,
    pub summary: String,
}

/// Whitening planner
pub struct WhiteningPlanner {
    realistic_step_limit: usize,
}

impl Default for WhiteningPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl WhiteningPlanner {
    /// Create a planner with the default realism limit
    pub fn new() -> Self {
        Self {
            realistic_step_limit: REALISTIC_STEP_LIMIT,
        }
    }

    /// Create a planner with a custom realism limit
    pub fn with_step_limit(realistic_step_limit: usize) -> Self {
        Self {
            realistic_step_limit,
        }
    }

    pub fn from_config(config: &PlanningConfig) -> Self {
        Self::with_step_limit(config.realistic_step_limit)
    }

    /// Pick a target shade for the patient
    ///
    /// The level's step budget is subtracted from the current brightness rank,
    /// clamped at the season's ceiling, then snapped to the nearest recommended
    /// shade at least as bright. A patient already at or beyond that shade is
    /// kept where they are with zero steps.
    ///
    /// # Arguments
    ///
    /// * `current` - Patient's current shade
    /// * `season` - Personal color season constraining the ceiling
    /// * `level` - How far the patient wants to go
    ///
    /// # Returns
    ///
    /// Target shade, steps needed and a warning when the plan is unrealistic
    pub fn recommend_target_shade(
        &self,
        current: Shade,
        season: Season,
        level: DesiredLevel,
    ) -> TargetRecommendation {
        let config = season.harmony();
        let current_rank = current.brightness_rank();
        let ceiling_rank = config.max_brightest.brightness_rank();

        let candidate_rank = current_rank
            .saturating_sub(level.step_budget())
            .max(ceiling_rank);

        let snapped = config
            .recommended
            .iter()
            .rev()
            .copied()
            .find(|shade| shade.brightness_rank() <= candidate_rank)
            .unwrap_or(config.max_brightest);

        if snapped.brightness_rank() >= current_rank {
            debug!(%current, %season, "already at or beyond seasonal target");
            return TargetRecommendation {
                current_shade: current,
                target_shade: current,
                steps_needed: 0,
                is_realistic: true,
                warning: Some(format!(
                    "{} is already as bright as {} coloring suits; further whitening \
                     is not recommended",
                    current, season
                )),
            };
        }

        let steps_needed = current_rank - snapped.brightness_rank();
        let is_realistic = steps_needed <= self.realistic_step_limit;
        let warning = (!is_realistic).then(|| {
            format!(
                "Going from {} to {} takes {} shade steps; more than {} is rarely \
                 reachable by whitening alone, consider asking a dentist about \
                 restorative options",
                current, snapped, steps_needed, self.realistic_step_limit
            )
        });

        debug!(
            %current,
            target = %snapped,
            candidate_rank,
            steps_needed,
            is_realistic,
            "target shade recommended"
        );

        TargetRecommendation {
            current_shade: current,
            target_shade: snapped,
            steps_needed,
            is_realistic,
            warning,
        }
    }

    /// Full whitening plan: target, harmony check, duration and methods
    pub fn calculate_whitening_goal(
        &self,
        current: Shade,
        season: Season,
        level: DesiredLevel,
    ) -> WhiteningGoalResult {
        let recommendation = self.recommend_target_shade(current, season, level);
        let over_whitening = is_over_whitening(recommendation.target_shade, season);
        let duration = estimate_duration(recommendation.steps_needed, level);
        let methods = rank_methods(recommendation.steps_needed, season);

        let summary = if recommendation.steps_needed == 0 {
            format!("No whitening needed, {} is already your target", current)
        } else {
            format!(
                "{}-step whitening plan, {}",
                recommendation.steps_needed, duration
            )
        };

        WhiteningGoalResult {
            current_shade: current,
            target_shade: recommendation.target_shade,
            season,
            desired_level: level,
            steps_needed: recommendation.steps_needed,
            duration,
            is_realistic: recommendation.is_realistic,
            is_over_whitening: over_whitening.is_over,
            over_whitening_reason: over_whitening.reason,
            warning: recommendation.warning,
            methods,
            summary,
        }
    }
}

/// [`WhiteningPlanner::recommend_target_shade`] with default settings
pub fn recommend_target_shade(
    current: Shade,
    season: Season,
    level: DesiredLevel,
) -> TargetRecommendation {
    WhiteningPlanner::new().recommend_target_shade(current, season, level)
}

/// [`WhiteningPlanner::calculate_whitening_goal`] with default settings
pub fn calculate_whitening_goal(
    current: Shade,
    season: Season,
    level: DesiredLevel,
) -> WhiteningGoalResult {
    WhiteningPlanner::new().calculate_whitening_goal(current, season, level)
}

/// Estimate treatment duration
///
/// Base range is `steps` to `2 × steps` weeks. Subtle plans add two weeks of
/// margin at the top; dramatic plans halve the range on the assumption of
/// in-office treatment. Each level has a floor, and a zero-step plan takes
/// zero weeks.
pub fn estimate_duration(steps: usize, level: DesiredLevel) -> DurationRange {
    if steps == 0 {
        return DurationRange::new(0, 0);
    }

    let steps = u32::try_from(steps).unwrap_or(u32::MAX / 4);
    let (min_weeks, max_weeks) = match level {
        DesiredLevel::Subtle => (steps, 2 * steps + 2),
        DesiredLevel::Moderate => (steps, 2 * steps),
        DesiredLevel::Dramatic => (steps.div_ceil(2), steps),
    };

    let floor = level.duration_floor();
    DurationRange::new(
        min_weeks.max(floor.min_weeks),
        max_weeks.max(floor.max_weeks),
    )
}

/// Rank whitening methods for a plan of `steps` shade steps
///
/// Each method scores its base suitability inside its step band and loses
/// points per step outside it. In the warmest season aggressive methods take
/// a fixed penalty and carry an explanatory note. Best method first.
pub fn rank_methods(steps: usize, season: Season) -> Vec<MethodRecommendation> {
    let mut ranked: Vec<MethodRecommendation> = WhiteningMethod::ALL
        .iter()
        .map(|method| {
            let (low, high) = method.step_band();
            let distance = if steps < low {
                low - steps
            } else {
                steps.saturating_sub(high)
            };

            let penalty = u8::try_from(distance)
                .unwrap_or(u8::MAX)
                .saturating_mul(OUT_OF_BAND_PENALTY_PER_STEP);
            let mut suitability = method
                .in_band_score()
                .saturating_sub(penalty)
                .max(MIN_SUITABILITY);

            let mut note = None;
            if season.is_warmest() && method.is_aggressive() {
                suitability = suitability
                    .saturating_sub(WARM_SEASON_AGGRESSIVE_PENALTY)
                    .max(MIN_SUITABILITY);
                note = Some(format!(
                    "{} can push past the natural range; warm {} coloring looks best \
                     with gradual whitening",
                    method.display_name(),
                    season
                ));
            }

            MethodRecommendation {
                method: *method,
                suitability,
                note,
            }
        })
        .collect();

    ranked.sort_by(|x, y| y.suitability.cmp(&x.suitability));
    ranked
}
