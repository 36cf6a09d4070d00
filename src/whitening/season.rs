//! Personal color season harmony
//!
//! Each season owns a fixed set of recommended shades (brightest first), a
//! brightness ceiling and an avoid-list. Configuration comes from an
//! exhaustive `match`, so every season is covered by construction.
//!
//! Over-whitening is two explicit special cases, not a rule derived from the
//! tables:
//! - spring (warm-leaning): the coolest bleached class
//! - autumn (warmest): any bleached class
//!
//! Avoid-listed shades that are merely darker than typical are reported as
//! not recommended, never as over-whitened.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::shade::Shade;
use crate::{DiagnosticsError, Result};

/// The cool-leaning bleached class
pub const COOLEST_BLEACHED: Shade = Shade::Bleached1;

/// Personal color season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    /// Warm-leaning seasons
    pub fn is_warm(&self) -> bool {
        matches!(self, Season::Spring | Season::Autumn)
    }

    /// The warmest season
    pub fn is_warmest(&self) -> bool {
        matches!(self, Season::Autumn)
    }

    /// Harmony configuration for this season
    pub fn harmony(&self) -> &'static SeasonHarmonyConfig {
        match self {
            Season::Spring => &SPRING,
            Season::Summer => &SUMMER,
            Season::Autumn => &AUTUMN,
            Season::Winter => &WINTER,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Season {
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            _ => Err(DiagnosticsError::invalid_parameter("season", s)),
        }
    }
}

/// Per-season shade harmony table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonHarmonyConfig {
    /// Recommended shades, brightest first
    pub recommended: &'static [Shade],
    /// Brightest shade a plan may target
    pub max_brightest: Shade,
    /// Shades reported as not recommended
    pub avoid: &'static [Shade],
    pub narrative: &'static str,
}

impl SeasonHarmonyConfig {
    pub fn is_recommended(&self, shade: Shade) -> bool {
        self.recommended.contains(&shade)
    }

    pub fn is_avoided(&self, shade: Shade) -> bool {
        self.avoid.contains(&shade)
    }
}

static SPRING: SeasonHarmonyConfig = SeasonHarmonyConfig {
    recommended: &[Shade::B1, Shade::A1, Shade::B2, Shade::A2],
    max_brightest: Shade::B1,
    avoid: &[Shade::Bleached1, Shade::C3, Shade::C4],
    narrative: "Spring coloring is warm and clear. Bright ivory shades with a hint of \
                warmth keep a smile fresh without looking chalky.",
};

static SUMMER: SeasonHarmonyConfig = SeasonHarmonyConfig {
    recommended: &[Shade::Bleached2, Shade::Bleached3, Shade::B1, Shade::A1, Shade::B2],
    max_brightest: Shade::Bleached2,
    avoid: &[Shade::A3_5, Shade::A4],
    narrative: "Summer coloring is cool and soft. Clean, slightly cool whites sit \
                naturally; deep yellow tones compete with the complexion.",
};

static AUTUMN: SeasonHarmonyConfig = SeasonHarmonyConfig {
    recommended: &[Shade::A1, Shade::B2, Shade::A2, Shade::A3],
    max_brightest: Shade::A1,
    avoid: &[Shade::Bleached1, Shade::Bleached2, Shade::Bleached3],
    narrative: "Autumn coloring is the warmest and deepest. Natural creamy shades \
                harmonize best; bleached whites read as artificial.",
};

static WINTER: SeasonHarmonyConfig = SeasonHarmonyConfig {
    recommended: &[Shade::Bleached1, Shade::Bleached2, Shade::Bleached3, Shade::B1],
    max_brightest: Shade::Bleached1,
    avoid: &[Shade::A3_5, Shade::B4, Shade::A4],
    narrative: "Winter coloring is cool and high-contrast. Bright, crisp whites \
                match it; warm yellowish shades look dull beside it.",
};

/// Outcome of the over-whitening check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverWhiteningCheck {
    pub is_over: bool,
    pub reason: Option<String>,
}

/// Check whether `target` would look unnaturally white for `season`
pub fn is_over_whitening(target: Shade, season: Season) -> OverWhiteningCheck {
    let reason = match season {
        Season::Autumn if target.is_bleached() => Some(format!(
            "{} is a bleached shade; against warm autumn coloring any bleached white \
             looks artificial",
            target
        )),
        Season::Spring if target == COOLEST_BLEACHED => Some(format!(
            "{} is the coolest bleached shade and clashes with warm spring coloring",
            target
        )),
        _ => None,
    };

    if reason.is_some() {
        debug!(%target, %season, "over-whitening target");
    }

    OverWhiteningCheck {
        is_over: reason.is_some(),
        reason,
    }
}

/// Full harmony verdict for a target shade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyVerdict {
    pub target: Shade,
    pub season: Season,
    pub is_recommended: bool,
    pub is_avoided: bool,
    pub over_whitening: OverWhiteningCheck,
    pub note: String,
}

/// Classify a target shade against a season's harmony table
pub fn harmony_verdict(target: Shade, season: Season) -> HarmonyVerdict {
    let config = season.harmony();
    let over_whitening = is_over_whitening(target, season);
    let is_recommended = config.is_recommended(target);
    let is_avoided = config.is_avoided(target);

    let note = if let Some(reason) = &over_whitening.reason {
        format!("Over-whitening: {}", reason)
    } else if is_avoided {
        format!("{} is not recommended for {} coloring", target, season)
    } else if is_recommended {
        format!("{} harmonizes with {} coloring", target, season)
    } else {
        format!("{} is acceptable for {} coloring", target, season)
    };

    HarmonyVerdict {
        target,
        season,
        is_recommended,
        is_avoided,
        over_whitening,
        note,
    }
}
