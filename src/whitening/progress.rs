//! Whitening progress tracking

use serde::{Deserialize, Serialize};

use crate::shade::{step_difference, Shade};

/// Progress from a starting shade toward a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// 0-100
    pub percentage: f64,
    pub steps_completed: i32,
    pub steps_remaining: i32,
    pub total_steps: i32,
    pub is_goal_reached: bool,
    pub message: String,
}

const MESSAGE_GOAL_REACHED: &str =
    "Goal reached! Switch to maintenance to keep your new shade.";
const MESSAGE_ALMOST_THERE: &str = "Almost there, the last steps are the most visible.";
const MESSAGE_HALFWAY: &str = "Past the halfway mark, keep the routine steady.";
const MESSAGE_UNDERWAY: &str = "Good start, the first changes are showing.";
const MESSAGE_STARTING: &str = "Just getting started, results build over the first weeks.";

/// Compare start, current and target shades
///
/// Step counts are signed brightness steps; a negative `steps_completed`
/// means the teeth got darker than the starting shade. A target at or below
/// the start counts as 100%.
pub fn track_progress(start: Shade, current: Shade, target: Shade) -> ProgressReport {
    let total_steps = step_difference(start, target);
    let steps_completed = step_difference(start, current);
    let steps_remaining = step_difference(current, target);

    let percentage = if total_steps <= 0 {
        100.0
    } else {
        (f64::from(steps_completed) / f64::from(total_steps) * 100.0).clamp(0.0, 100.0)
    };

    let is_goal_reached = steps_remaining <= 0;

    ProgressReport {
        percentage,
        steps_completed,
        steps_remaining,
        total_steps,
        is_goal_reached,
        message: progress_message(percentage, is_goal_reached).to_string(),
    }
}

fn progress_message(percentage: f64, is_goal_reached: bool) -> &'static str {
    if is_goal_reached {
        MESSAGE_GOAL_REACHED
    } else if percentage >= 75.0 {
        MESSAGE_ALMOST_THERE
    } else if percentage >= 50.0 {
        MESSAGE_HALFWAY
    } else if percentage >= 25.0 {
        MESSAGE_UNDERWAY
    } else {
        MESSAGE_STARTING
    }
}
