//! Formation catalog: named player layouts and the default opponent layout.
//!
//! The catalog is fixed data. Each named formation carries one hand-placed
//! layout per orientation; the vertical layouts are authored on the portrait
//! canvas, not derived from the landscape ones. Tables hold positions as
//! authored, which is display space for the orientation they belong to;
//! [`Formation::seed_positions`] inverse-projects a table through
//! [`Projection::base`] so rosters are always seeded with logical pitch
//! coordinates (for horizontal the two spaces coincide).
//!
//! `Custom` is a sentinel, not a layout: it has no catalog entry and lookup
//! returns `None`, which callers short-circuit.

#[cfg(test)]
#[path = "formation_test.rs"]
mod formation_test;

use serde::{Deserialize, Serialize};

use crate::pitch::{Orientation, Point, Projection};

/// Per-axis drag tolerance in logical units before a named formation is
/// considered hand-modified and flips to `custom`.
pub const CUSTOM_TOLERANCE: f64 = 5.0;

/// Players per roster; every catalog table has exactly this many entries.
pub const ROSTER_SIZE: usize = 11;

/// A named formation from the fixed catalog, or the `custom` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Formation {
    #[default]
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "5-3-2")]
    F532,
    #[serde(rename = "custom")]
    Custom,
}

impl Formation {
    /// Wire identifier, as stored in `uiStates.selectedFormation`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::F433 => "4-3-3",
            Self::F442 => "4-4-2",
            Self::F352 => "3-5-2",
            Self::F4231 => "4-2-3-1",
            Self::F532 => "5-3-2",
            Self::Custom => "custom",
        }
    }

    /// Parse a wire identifier. Unknown strings yield `None`; snapshot
    /// readers treat that like any other malformed field.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "4-3-3" => Some(Self::F433),
            "4-4-2" => Some(Self::F442),
            "3-5-2" => Some(Self::F352),
            "4-2-3-1" => Some(Self::F4231),
            "5-3-2" => Some(Self::F532),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Human-readable picker label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::F433 => "4-3-3 (Classic)",
            Self::F442 => "4-4-2 (Diamond)",
            Self::F352 => "3-5-2 (Wing Backs)",
            Self::F4231 => "4-2-3-1 (Modern)",
            Self::F532 => "5-3-2 (Defensive)",
            Self::Custom => "Custom",
        }
    }

    #[must_use]
    pub fn is_custom(self) -> bool {
        self == Self::Custom
    }

    /// The authored layout table for this formation and orientation, or
    /// `None` for `Custom`.
    #[must_use]
    pub fn positions(self, orientation: Orientation) -> Option<&'static [(f64, f64); ROSTER_SIZE]> {
        let table = match self {
            Self::F433 => &F433_TABLE,
            Self::F442 => &F442_TABLE,
            Self::F352 => &F352_TABLE,
            Self::F4231 => &F4231_TABLE,
            Self::F532 => &F532_TABLE,
            Self::Custom => return None,
        };
        Some(match orientation {
            Orientation::Horizontal => &table.horizontal,
            Orientation::Vertical => &table.vertical,
        })
    }

    /// Logical pitch positions to seed a player roster with, or `None` for
    /// `Custom`.
    #[must_use]
    pub fn seed_positions(self, orientation: Orientation) -> Option<Vec<Point>> {
        self.positions(orientation)
            .map(|table| to_logical(table, orientation))
    }
}

/// The authored default opponent layout for `orientation`.
#[must_use]
pub fn default_opponents(orientation: Orientation) -> &'static [(f64, f64); ROSTER_SIZE] {
    match orientation {
        Orientation::Horizontal => &OPPONENTS_HORIZONTAL,
        Orientation::Vertical => &OPPONENTS_VERTICAL,
    }
}

/// Logical pitch positions to seed the opponent roster with.
#[must_use]
pub fn seed_opponents(orientation: Orientation) -> Vec<Point> {
    to_logical(default_opponents(orientation), orientation)
}

fn to_logical(table: &[(f64, f64); ROSTER_SIZE], orientation: Orientation) -> Vec<Point> {
    let proj = Projection::base(orientation);
    table.iter().map(|&(x, y)| proj.to_logical(Point::new(x, y))).collect()
}

// ====== CATALOG DATA ======

struct FormationTable {
    horizontal: [(f64, f64); ROSTER_SIZE],
    vertical: [(f64, f64); ROSTER_SIZE],
}

// Entry order per table: GK, back line, midfield, front line.

const F433_TABLE: FormationTable = FormationTable {
    horizontal: [
        (50.0, 240.0),
        (170.0, 160.0),
        (170.0, 330.0),
        (270.0, 60.0),
        (270.0, 420.0),
        (400.0, 160.0),
        (400.0, 320.0),
        (550.0, 240.0),
        (700.0, 100.0),
        (700.0, 380.0),
        (800.0, 240.0),
    ],
    vertical: [
        (240.0, 50.0),
        (160.0, 170.0),
        (330.0, 170.0),
        (60.0, 270.0),
        (420.0, 270.0),
        (160.0, 400.0),
        (320.0, 400.0),
        (240.0, 550.0),
        (100.0, 700.0),
        (380.0, 700.0),
        (240.0, 800.0),
    ],
};

const F442_TABLE: FormationTable = FormationTable {
    horizontal: [
        (50.0, 240.0),
        (170.0, 160.0),
        (170.0, 330.0),
        (270.0, 60.0),
        (270.0, 420.0),
        (450.0, 150.0),
        (450.0, 340.0),
        (600.0, 60.0),
        (600.0, 420.0),
        (750.0, 160.0),
        (750.0, 320.0),
    ],
    vertical: [
        (240.0, 50.0),
        (160.0, 170.0),
        (330.0, 170.0),
        (60.0, 270.0),
        (420.0, 270.0),
        (150.0, 450.0),
        (340.0, 450.0),
        (60.0, 600.0),
        (420.0, 600.0),
        (160.0, 750.0),
        (320.0, 750.0),
    ],
};

const F352_TABLE: FormationTable = FormationTable {
    horizontal: [
        (50.0, 240.0),
        (170.0, 120.0),
        (170.0, 240.0),
        (170.0, 360.0),
        (480.0, 60.0),
        (480.0, 420.0),
        (400.0, 160.0),
        (400.0, 320.0),
        (550.0, 240.0),
        (750.0, 160.0),
        (750.0, 320.0),
    ],
    vertical: [
        (240.0, 50.0),
        (120.0, 170.0),
        (240.0, 170.0),
        (360.0, 170.0),
        (60.0, 480.0),
        (420.0, 480.0),
        (160.0, 400.0),
        (320.0, 400.0),
        (240.0, 550.0),
        (160.0, 750.0),
        (320.0, 750.0),
    ],
};

const F4231_TABLE: FormationTable = FormationTable {
    horizontal: [
        (50.0, 240.0),
        (170.0, 160.0),
        (170.0, 330.0),
        (270.0, 60.0),
        (270.0, 420.0),
        (400.0, 160.0),
        (400.0, 320.0),
        (600.0, 100.0),
        (600.0, 240.0),
        (600.0, 380.0),
        (750.0, 240.0),
    ],
    vertical: [
        (240.0, 50.0),
        (160.0, 170.0),
        (330.0, 170.0),
        (60.0, 270.0),
        (420.0, 270.0),
        (160.0, 400.0),
        (320.0, 400.0),
        (100.0, 600.0),
        (240.0, 600.0),
        (380.0, 600.0),
        (240.0, 750.0),
    ],
};

const F532_TABLE: FormationTable = FormationTable {
    horizontal: [
        (50.0, 240.0),
        (170.0, 120.0),
        (170.0, 240.0),
        (170.0, 360.0),
        (300.0, 40.0),
        (300.0, 440.0),
        (450.0, 120.0),
        (450.0, 240.0),
        (450.0, 360.0),
        (750.0, 160.0),
        (750.0, 320.0),
    ],
    vertical: [
        (240.0, 50.0),
        (120.0, 170.0),
        (240.0, 170.0),
        (360.0, 170.0),
        (40.0, 300.0),
        (440.0, 300.0),
        (120.0, 450.0),
        (240.0, 450.0),
        (360.0, 450.0),
        (160.0, 750.0),
        (320.0, 750.0),
    ],
};

const OPPONENTS_HORIZONTAL: [(f64, f64); ROSTER_SIZE] = [
    (850.0, 240.0),
    (750.0, 180.0),
    (750.0, 310.0),
    (650.0, 60.0),
    (650.0, 420.0),
    (490.0, 150.0),
    (490.0, 330.0),
    (380.0, 245.0),
    (200.0, 110.0),
    (200.0, 380.0),
    (100.0, 245.0),
];

const OPPONENTS_VERTICAL: [(f64, f64); ROSTER_SIZE] = [
    (240.0, 850.0),
    (180.0, 750.0),
    (310.0, 750.0),
    (60.0, 650.0),
    (420.0, 650.0),
    (150.0, 490.0),
    (330.0, 490.0),
    (245.0, 380.0),
    (110.0, 200.0),
    (380.0, 200.0),
    (245.0, 100.0),
];
