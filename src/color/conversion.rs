//! Color space conversion utilities
//!
//! Provides conversions between the color spaces the diagnostics engine uses:
//! - sRGB (8-bit) to CIE Lab under D65
//! - Lab back to sRGB and hex for display
//! - Lab to LCh (cylindrical representation)
//! - Region-of-interest averaging in Lab
//!
//! Inputs are not range-checked. Lab values outside `0 ≤ L ≤ 100` or
//! `-128 ≤ a, b ≤ 127` propagate through every formula unchanged, so that an
//! upstream bug shows up as an odd result rather than being hidden by a clamp.
//! The only quantisation step that clamps is [`ColorConverter::lab_to_rgb`],
//! because a byte cannot hold anything else.

use palette::convert::FromColorUnclamped;
use palette::white_point::D65;
use palette::{FromColor, Lab, Lch, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DiagnosticsError, Result};

/// CIE L*a*b* color under the D65 white point
///
/// Immutable value type. `l` is conventionally in `[0, 100]` and `a`, `b` in
/// `[-128, 127]`, but the type does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabColor {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl LabColor {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, `sqrt(a² + b²)`
    pub fn chroma(&self) -> f64 {
        self.a.hypot(self.b)
    }
}

impl From<LabColor> for Lab<D65, f64> {
    fn from(color: LabColor) -> Self {
        Lab::new(color.l, color.a, color.b)
    }
}

impl From<Lab<D65, f64>> for LabColor {
    fn from(lab: Lab<D65, f64>) -> Self {
        LabColor::new(lab.l, lab.a, lab.b)
    }
}

impl fmt::Display for LabColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L*{:.1} a*{:.1} b*{:.1}", self.l, self.a, self.b)
    }
}

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Cylindrical view of a Lab color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LchColor {
    pub l: f64,
    pub chroma: f64,
    /// Hue angle in degrees, `[0, 360)`
    pub hue: f64,
}

/// Converter between sRGB and Lab (D65)
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to Lab color space
    ///
    /// Gamma-linearises the sRGB channels, maps them to XYZ and from there to
    /// Lab relative to the D65 reference white.
    ///
    /// # Arguments
    ///
    /// * `rgb` - 8-bit sRGB color, each channel in range [0, 255]
    ///
    /// # Returns
    ///
    /// Lab color in D65 illuminant
    pub fn rgb_to_lab(&self, rgb: RgbColor) -> LabColor {
        let srgb: Srgb<f64> = Srgb::new(
            f64::from(rgb.r) / 255.0,
            f64::from(rgb.g) / 255.0,
            f64::from(rgb.b) / 255.0,
        );
        Lab::<D65, f64>::from_color(srgb).into()
    }

    /// Convert Lab to 8-bit sRGB
    ///
    /// Channels outside the sRGB gamut are clamped at quantisation.
    pub fn lab_to_rgb(&self, lab: LabColor) -> RgbColor {
        let srgb = self.lab_to_srgb_unclamped(lab);
        RgbColor::new(
            quantize(srgb.red),
            quantize(srgb.green),
            quantize(srgb.blue),
        )
    }

    /// Convert Lab to a display hex string (e.g. `"#F2E8D5"`)
    pub fn lab_to_hex(&self, lab: LabColor) -> String {
        self.rgb_to_hex(self.lab_to_rgb(lab))
    }

    /// Format an RGB color as hex
    pub fn rgb_to_hex(&self, rgb: RgbColor) -> String {
        format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
    }

    /// Parse hexadecimal color string to RGB
    ///
    /// Accepts `"#RRGGBB"` or `"RRGGBB"`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the string is not six hex digits
    pub fn hex_to_rgb(&self, hex: &str) -> Result<RgbColor> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(DiagnosticsError::invalid_parameter("hex", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| DiagnosticsError::invalid_parameter("hex", hex))
        };

        Ok(RgbColor::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Convert Lab to LCh
    pub fn lab_to_lch(&self, lab: LabColor) -> LchColor {
        let lch = Lch::<D65, f64>::from_color(Lab::<D65, f64>::from(lab));
        LchColor {
            l: lch.l,
            chroma: lch.chroma,
            hue: lch.hue.into_positive_degrees(),
        }
    }

    /// Check if a Lab color is within sRGB gamut
    pub fn is_in_srgb_gamut(&self, lab: LabColor) -> bool {
        let srgb = self.lab_to_srgb_unclamped(lab);
        [srgb.red, srgb.green, srgb.blue]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Average Lab value over a set of RGB samples
    ///
    /// Collapses a region-of-interest sample to one representative color.
    /// Averaging happens in Lab, after conversion of each sample. Returns
    /// `None` for an empty sample.
    pub fn average_lab(&self, samples: &[RgbColor]) -> Option<LabColor> {
        if samples.is_empty() {
            return None;
        }

        let (l, a, b) = samples
            .iter()
            .map(|rgb| self.rgb_to_lab(*rgb))
            .fold((0.0, 0.0, 0.0), |(l, a, b), lab| {
                (l + lab.l, a + lab.a, b + lab.b)
            });

        let n = samples.len() as f64;
        Some(LabColor::new(l / n, a / n, b / n))
    }

    /// Convert every RGB sample to Lab
    pub fn rgb_slice_to_lab(&self, samples: &[RgbColor]) -> Vec<LabColor> {
        samples.iter().map(|rgb| self.rgb_to_lab(*rgb)).collect()
    }

    fn lab_to_srgb_unclamped(&self, lab: LabColor) -> Srgb<f64> {
        Srgb::<f64>::from_color_unclamped(Lab::<D65, f64>::from(lab))
    }
}

fn quantize(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_lab_black() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(RgbColor::new(0, 0, 0));
        assert!(lab.l.abs() < 1e-6);
        assert!(lab.a.abs() < 1e-6);
        assert!(lab.b.abs() < 1e-6);
    }

    #[test]
    fn test_rgb_to_lab_white() {
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(RgbColor::new(255, 255, 255));
        assert!((lab.l - 100.0).abs() < 0.01);
        assert!(lab.a.abs() < 0.01);
        assert!(lab.b.abs() < 0.01);
    }

    #[test]
    fn test_rgb_to_lab_red_reference() {
        // Pure sRGB red is L*53.24 a*80.09 b*67.20 under D65
        let converter = ColorConverter::new();
        let lab = converter.rgb_to_lab(RgbColor::new(255, 0, 0));
        assert!((lab.l - 53.24).abs() < 0.1);
        assert!((lab.a - 80.09).abs() < 0.2);
        assert!((lab.b - 67.20).abs() < 0.2);
    }

    #[test]
    fn test_lab_rgb_roundtrip_within_tolerance() {
        let converter = ColorConverter::new();
        let original = RgbColor::new(238, 226, 204);
        let back = converter.lab_to_rgb(converter.rgb_to_lab(original));
        assert!((i16::from(back.r) - i16::from(original.r)).abs() <= 1);
        assert!((i16::from(back.g) - i16::from(original.g)).abs() <= 1);
        assert!((i16::from(back.b) - i16::from(original.b)).abs() <= 1);
    }

    #[test]
    fn test_lab_to_hex() {
        let converter = ColorConverter::new();
        assert_eq!(converter.lab_to_hex(LabColor::new(100.0, 0.0, 0.0)), "#FFFFFF");
        assert_eq!(converter.lab_to_hex(LabColor::new(0.0, 0.0, 0.0)), "#000000");
    }

    #[test]
    fn test_hex_to_rgb() {
        let converter = ColorConverter::new();
        assert_eq!(converter.hex_to_rgb("#FF8000").unwrap(), RgbColor::new(255, 128, 0));
        assert_eq!(converter.hex_to_rgb("00ff00").unwrap(), RgbColor::new(0, 255, 0));
    }

    #[test]
    fn test_hex_to_rgb_invalid() {
        let converter = ColorConverter::new();
        assert!(converter.hex_to_rgb("#FF").is_err());
        assert!(converter.hex_to_rgb("#GGGGGG").is_err());
        assert!(converter.hex_to_rgb("#ÿÿÿ").is_err());
        assert!(converter.hex_to_rgb("#+F+F+F").is_err());
        assert!(converter.hex_to_rgb("##FFFFFF").is_err());
        assert!(converter.hex_to_rgb("#-1-1-1").is_err());
    }

    #[test]
    fn test_lab_to_lch() {
        let converter = ColorConverter::new();
        let lch = converter.lab_to_lch(LabColor::new(50.0, 25.0, 25.0));
        assert!((lch.l - 50.0).abs() < 1e-9);
        assert!((lch.chroma - 25.0_f64.hypot(25.0)).abs() < 1e-9);
        assert!((lch.hue - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_gamut_checking() {
        let converter = ColorConverter::new();
        assert!(converter.is_in_srgb_gamut(LabColor::new(50.0, 0.0, 0.0)));
        assert!(!converter.is_in_srgb_gamut(LabColor::new(50.0, 120.0, -120.0)));
    }

    #[test]
    fn test_average_lab() {
        let converter = ColorConverter::new();
        assert!(converter.average_lab(&[]).is_none());

        let white = RgbColor::new(255, 255, 255);
        let black = RgbColor::new(0, 0, 0);
        let avg = converter.average_lab(&[white, black]).unwrap();
        assert!((avg.l - 50.0).abs() < 0.01);
        assert!(avg.a.abs() < 0.01);
    }

    #[test]
    fn test_out_of_range_lab_is_not_clamped() {
        let lab = LabColor::new(130.0, 200.0, -200.0);
        assert_eq!(lab.l, 130.0);
        assert!(lab.chroma() > 280.0);
    }
}
