//! Pitch coordinate system: the fixed logical space and display projections.
//!
//! All board state lives in logical pitch coordinates, a fixed landscape
//! space of [`PITCH_WIDTH`] x [`PITCH_HEIGHT`] units with the origin at the
//! top-left corner and x growing toward the right goal. Rendering surfaces
//! differ per device and per orientation, so every read or write of a
//! display position goes through a [`Projection`], which pairs an
//! [`Orientation`] with the display [`Bounds`] and converts in both
//! directions. The two conversions are exact mutual inverses.

#[cfg(test)]
#[path = "pitch_test.rs"]
mod pitch_test;

use serde::{Deserialize, Serialize};

/// Logical pitch length in units (left goal line to right goal line).
pub const PITCH_WIDTH: f64 = 900.0;

/// Logical pitch depth in units (touchline to touchline).
pub const PITCH_HEIGHT: f64 = 480.0;

/// Center of the pitch in logical coordinates; the ball starts here.
pub const PITCH_CENTER: Point = Point { x: PITCH_WIDTH / 2.0, y: PITCH_HEIGHT / 2.0 };

/// A point in either logical pitch space or display space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How the pitch is laid out on the display surface.
///
/// Logical coordinates are always landscape; `Vertical` only changes how
/// they are projected for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Canonical display bounds for this orientation, matching the base
    /// canvas sizes the editor lays out before responsive scaling.
    #[must_use]
    pub fn base_bounds(self) -> Bounds {
        match self {
            Self::Horizontal => Bounds { width: PITCH_WIDTH, height: PITCH_HEIGHT },
            Self::Vertical => Bounds { width: PITCH_HEIGHT, height: PITCH_WIDTH },
        }
    }
}

/// Display-surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A projection cannot scale into a surface with a non-positive or
    /// non-finite dimension.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.width.is_finite() && self.height > 0.0 && self.height.is_finite())
    }
}

/// Projection between logical pitch coordinates and a display surface.
///
/// Horizontal orientation is the identity mapping. Vertical rescales the
/// logical y axis onto the display x axis and mirrors the logical x axis
/// onto the display y axis, so the left goal ends up at the bottom of a
/// portrait screen. Degenerate bounds (zero, negative, or non-finite) make
/// both conversions return the input unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub orientation: Orientation,
    pub bounds: Bounds,
}

impl Projection {
    #[must_use]
    pub fn new(orientation: Orientation, bounds: Bounds) -> Self {
        Self { orientation, bounds }
    }

    /// Projection onto the canonical display bounds for `orientation`.
    #[must_use]
    pub fn base(orientation: Orientation) -> Self {
        Self { orientation, bounds: orientation.base_bounds() }
    }

    /// Convert a logical pitch point to display coordinates.
    #[must_use]
    pub fn to_display(&self, logical: Point) -> Point {
        match self.orientation {
            Orientation::Horizontal => logical,
            Orientation::Vertical => {
                if self.bounds.is_degenerate() {
                    return logical;
                }
                Point {
                    x: (logical.y / PITCH_HEIGHT) * self.bounds.width,
                    y: ((PITCH_WIDTH - logical.x) / PITCH_WIDTH) * self.bounds.height,
                }
            }
        }
    }

    /// Convert a display point back to logical pitch coordinates.
    #[must_use]
    pub fn to_logical(&self, display: Point) -> Point {
        match self.orientation {
            Orientation::Horizontal => display,
            Orientation::Vertical => {
                if self.bounds.is_degenerate() {
                    return display;
                }
                Point {
                    x: PITCH_WIDTH - (display.y / self.bounds.height) * PITCH_WIDTH,
                    y: (display.x / self.bounds.width) * PITCH_HEIGHT,
                }
            }
        }
    }

    /// Convert each point of a polyline to display coordinates.
    #[must_use]
    pub fn points_to_display(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.to_display(p)).collect()
    }

    /// Convert each point of a polyline back to logical coordinates.
    #[must_use]
    pub fn points_to_logical(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.to_logical(p)).collect()
    }

    /// Display rotation for a logical rotation in degrees. Vertical layouts
    /// turn rotation-sensitive nodes a quarter turn clockwise.
    #[must_use]
    pub fn rotation_to_display(&self, degrees: f64) -> f64 {
        match self.orientation {
            Orientation::Horizontal => degrees,
            Orientation::Vertical => degrees + 90.0,
        }
    }

    /// Logical rotation for a display rotation in degrees.
    #[must_use]
    pub fn rotation_to_logical(&self, degrees: f64) -> f64 {
        match self.orientation {
            Orientation::Horizontal => degrees,
            Orientation::Vertical => degrees - 90.0,
        }
    }
}
