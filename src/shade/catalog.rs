//! Reference shade catalog
//!
//! Sixteen natural shades of the classical A–D guide plus three bleached
//! classes, each with a reference Lab value measured under D65.
//!
//! The declaration order of [`Shade`] *is* the brightness order, brightest
//! first. [`Shade::ALL`], each entry's `brightness_rank` and every step count
//! are derived from it; nothing else encodes brightness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::{ColorConverter, LabColor};
use crate::{DiagnosticsError, Result};

/// Number of shades in the catalog
pub const SHADE_COUNT: usize = 19;

/// A named shade class, declared brightest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Shade {
    Bleached1,
    Bleached2,
    Bleached3,
    B1,
    A1,
    B2,
    D2,
    A2,
    C1,
    C2,
    D4,
    A3,
    D3,
    B3,
    A3_5,
    B4,
    C3,
    A4,
    C4,
}

/// Shade family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadeSeries {
    /// Reddish-brown
    A,
    /// Reddish-yellow
    B,
    /// Grey
    C,
    /// Reddish-grey
    D,
    /// Whitened beyond the natural range
    Bleached,
}

impl Shade {
    /// Every shade in brightness order, brightest first
    pub const ALL: [Shade; SHADE_COUNT] = [
        Shade::Bleached1,
        Shade::Bleached2,
        Shade::Bleached3,
        Shade::B1,
        Shade::A1,
        Shade::B2,
        Shade::D2,
        Shade::A2,
        Shade::C1,
        Shade::C2,
        Shade::D4,
        Shade::A3,
        Shade::D3,
        Shade::B3,
        Shade::A3_5,
        Shade::B4,
        Shade::C3,
        Shade::A4,
        Shade::C4,
    ];

    /// Catalog code, e.g. `"A3.5"` or `"0M1"`
    pub const fn code(self) -> &'static str {
        match self {
            Shade::Bleached1 => "0M1",
            Shade::Bleached2 => "0M2",
            Shade::Bleached3 => "0M3",
            Shade::B1 => "B1",
            Shade::A1 => "A1",
            Shade::B2 => "B2",
            Shade::D2 => "D2",
            Shade::A2 => "A2",
            Shade::C1 => "C1",
            Shade::C2 => "C2",
            Shade::D4 => "D4",
            Shade::A3 => "A3",
            Shade::D3 => "D3",
            Shade::B3 => "B3",
            Shade::A3_5 => "A3.5",
            Shade::B4 => "B4",
            Shade::C3 => "C3",
            Shade::A4 => "A4",
            Shade::C4 => "C4",
        }
    }

    /// Position in the brightness order; 0 is the brightest shade
    pub const fn brightness_rank(self) -> usize {
        self as usize
    }

    /// Shade at a brightness rank, if in range
    pub fn from_rank(rank: usize) -> Option<Shade> {
        Shade::ALL.get(rank).copied()
    }

    pub const fn series(self) -> ShadeSeries {
        match self {
            Shade::Bleached1 | Shade::Bleached2 | Shade::Bleached3 => ShadeSeries::Bleached,
            Shade::A1 | Shade::A2 | Shade::A3 | Shade::A3_5 | Shade::A4 => ShadeSeries::A,
            Shade::B1 | Shade::B2 | Shade::B3 | Shade::B4 => ShadeSeries::B,
            Shade::C1 | Shade::C2 | Shade::C3 | Shade::C4 => ShadeSeries::C,
            Shade::D2 | Shade::D3 | Shade::D4 => ShadeSeries::D,
        }
    }

    pub const fn is_bleached(self) -> bool {
        matches!(self.series(), ShadeSeries::Bleached)
    }

    /// Reference Lab value (D65)
    pub const fn reference_lab(self) -> LabColor {
        match self {
            Shade::Bleached1 => LabColor::new(96.0, -0.8, 4.5),
            Shade::Bleached2 => LabColor::new(93.5, -0.6, 6.5),
            Shade::Bleached3 => LabColor::new(91.0, -0.2, 8.5),
            Shade::B1 => LabColor::new(87.0, -0.5, 12.0),
            Shade::A1 => LabColor::new(85.5, 0.2, 15.5),
            Shade::B2 => LabColor::new(84.0, -0.2, 18.5),
            Shade::D2 => LabColor::new(82.5, 0.5, 14.0),
            Shade::A2 => LabColor::new(81.5, 1.2, 18.0),
            Shade::C1 => LabColor::new(80.5, -0.3, 14.5),
            Shade::C2 => LabColor::new(78.0, 0.3, 17.0),
            Shade::D4 => LabColor::new(77.5, 1.0, 19.5),
            Shade::A3 => LabColor::new(77.0, 2.0, 21.5),
            Shade::D3 => LabColor::new(76.0, 1.3, 17.5),
            Shade::B3 => LabColor::new(75.5, 1.0, 24.5),
            Shade::A3_5 => LabColor::new(74.0, 2.8, 24.0),
            Shade::B4 => LabColor::new(73.5, 1.5, 26.5),
            Shade::C3 => LabColor::new(72.0, 1.0, 18.5),
            Shade::A4 => LabColor::new(70.0, 3.5, 25.5),
            Shade::C4 => LabColor::new(67.0, 2.5, 21.0),
        }
    }

    /// Catalog entry for this shade
    pub fn reference(self) -> &'static ShadeReference {
        &CATALOG[self.brightness_rank()]
    }

    /// Parse a catalog code
    ///
    /// # Errors
    ///
    /// Returns `UnknownShade` for any code outside the catalog
    pub fn from_code(code: &str) -> Result<Shade> {
        Shade::ALL
            .iter()
            .copied()
            .find(|shade| shade.code() == code.trim())
            .ok_or_else(|| DiagnosticsError::UnknownShade {
                code: code.to_string(),
            })
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Shade {
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self> {
        Shade::from_code(s)
    }
}

impl TryFrom<String> for Shade {
    type Error = DiagnosticsError;

    fn try_from(code: String) -> Result<Self> {
        Shade::from_code(&code)
    }
}

impl From<Shade> for String {
    fn from(shade: Shade) -> Self {
        shade.code().to_string()
    }
}

/// One row of the reference catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadeReference {
    pub shade: Shade,
    pub code: &'static str,
    pub lab: LabColor,
    pub series: ShadeSeries,
    pub brightness_rank: usize,
}

impl ShadeReference {
    /// Display hex of the reference color
    pub fn hex(&self) -> String {
        ColorConverter::new().lab_to_hex(self.lab)
    }
}

/// The full catalog, indexed by brightness rank
pub static CATALOG: [ShadeReference; SHADE_COUNT] = build_catalog();

const fn build_catalog() -> [ShadeReference; SHADE_COUNT] {
    let mut entries = [reference_for(Shade::Bleached1); SHADE_COUNT];
    let mut rank = 0;
    while rank < SHADE_COUNT {
        entries[rank] = reference_for(Shade::ALL[rank]);
        rank += 1;
    }
    entries
}

const fn reference_for(shade: Shade) -> ShadeReference {
    ShadeReference {
        shade,
        code: shade.code(),
        lab: shade.reference_lab(),
        series: shade.series(),
        brightness_rank: shade.brightness_rank(),
    }
}
