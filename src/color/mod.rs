//! Color conversion and perceptual difference module
//!
//! This module handles sRGB/Lab conversions and the CIEDE2000 difference
//! used by every matching decision downstream.

pub mod conversion;
pub mod difference;

pub use conversion::{ColorConverter, LabColor, LchColor, RgbColor};
pub use difference::{ciede2000, difference, match_confidence, DeltaEBand, DeltaEWeights};
