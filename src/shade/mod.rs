//! Shade catalog and nearest-match search
//!
//! This module holds the fixed reference guide and the CIEDE2000 search that
//! maps a measured Lab color onto it.

pub mod catalog;
pub mod matcher;

pub use catalog::{Shade, ShadeReference, ShadeSeries, CATALOG, SHADE_COUNT};
pub use matcher::{
    find_best_match, find_best_match_with, match_among, rank_shades, step_difference,
    step_difference_codes, MatchResult, ShadeDistance,
};
