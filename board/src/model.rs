//! Board state: the entity graph for one tactical board.
//!
//! This module defines the aggregate the editor mutates and the adapters
//! persist: two rosters of [`Player`] markers, drawn [`AnnotationLine`]s,
//! free [`TextLabel`]s, the ball, and the [`UiStates`] record of display
//! toggles. All positions are logical pitch coordinates (see
//! [`crate::pitch`]); nothing here knows about display bounds.
//!
//! Two invariants are maintained by the mutation paths rather than the
//! types: the opponent roster is empty exactly when `show_opponents` is
//! false, and `selected_formation` flips to `custom` once any player is
//! dragged beyond [`CUSTOM_TOLERANCE`](crate::formation::CUSTOM_TOLERANCE)
//! of its seeded catalog position (a one-way transition until a formation
//! is loaded again).

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

use crate::formation::{self, CUSTOM_TOLERANCE, Formation};
use crate::pitch::{Orientation, PITCH_CENTER, Point};

// ====== FIXED COLORS & DEFAULTS ======

/// Fill color of own-team markers; doubles as the roster discriminator in
/// the legacy scene format.
pub const PLAYER_COLOR: &str = "#2196F3";

/// Fill color of opponent markers.
pub const OPPONENT_COLOR: &str = "#F44336";

/// Stroke color for new annotation lines.
pub const DEFAULT_LINE_COLOR: &str = "black";

/// Stroke width for new annotation lines.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Brush slider range for annotation stroke widths.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
pub const MAX_STROKE_WIDTH: f64 = 20.0;

/// Placeholder content for a freshly created text label.
pub const DEFAULT_TEXT: &str = "Click to edit";

/// Font size for new text labels.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Display width for new text labels.
pub const DEFAULT_TEXT_WIDTH: f64 = 200.0;

// ====== TYPES ======

/// A fielded marker, own team or opponent.
///
/// `initial_x` / `initial_y` record the seeded catalog position and never
/// change after seeding; resets and the custom-formation check both anchor
/// on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub color: String,
    /// Jersey number, 1-based roster order for seeded rosters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    pub initial_x: f64,
    pub initial_y: f64,
}

impl Player {
    /// A marker seeded at a catalog position.
    #[must_use]
    pub fn seeded(id: u32, pos: Point, color: &str) -> Self {
        Self {
            id,
            x: pos.x,
            y: pos.y,
            color: color.to_string(),
            number: Some(id + 1),
            initial_x: pos.x,
            initial_y: pos.y,
        }
    }

    #[must_use]
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn initial_pos(&self) -> Point {
        Point::new(self.initial_x, self.initial_y)
    }
}

/// How an annotation line is drawn and extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    Arrow,
    Line,
    Freehand,
    Eraser,
}

impl DrawMode {
    /// Segment modes keep exactly two points; each extension replaces the
    /// endpoint instead of appending.
    #[must_use]
    pub fn is_segment(self) -> bool {
        matches!(self, Self::Arrow | Self::Line)
    }
}

/// A drawn annotation: an ordered point sequence plus stroke styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationLine {
    pub points: Vec<Point>,
    pub color: String,
    pub stroke_width: f64,
    pub mode: DrawMode,
}

/// A free text label placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLabel {
    /// Millisecond-epoch token, unique within a board.
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    pub width: f64,
    pub rotation: f64,
    /// Transient edit-mode flag; never persisted.
    #[serde(default, skip_serializing)]
    pub editing: bool,
}

impl TextLabel {
    /// A fresh label at `pos` with default content and geometry, opened for
    /// editing.
    #[must_use]
    pub fn placed(id: String, pos: Point) -> Self {
        Self {
            id,
            x: pos.x,
            y: pos.y,
            text: DEFAULT_TEXT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            width: DEFAULT_TEXT_WIDTH,
            rotation: 0.0,
            editing: true,
        }
    }

    #[must_use]
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Display toggles and selection state persisted alongside the entities.
/// Missing fields deserialize to their defaults, so partially populated
/// `uiStates` objects from older snapshots still load.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiStates {
    pub orientation: Orientation,
    pub show_grid: bool,
    pub show_numbers: bool,
    pub show_opponents: bool,
    pub show_ball: bool,
    pub selected_formation: Formation,
}

impl Default for UiStates {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            show_grid: false,
            show_numbers: false,
            show_opponents: false,
            show_ball: false,
            selected_formation: Formation::default(),
        }
    }
}

/// Aggregate root for one tactical board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub players: Vec<Player>,
    pub opponents: Vec<Player>,
    pub lines: Vec<AnnotationLine>,
    pub texts: Vec<TextLabel>,
    pub ball: Point,
    pub ui: UiStates,
}

impl Default for BoardState {
    /// The default formation on an otherwise empty horizontal board.
    fn default() -> Self {
        Self::with_formation(Formation::default(), Orientation::default())
    }
}

impl BoardState {
    /// A fresh board seeded from the catalog. `Custom` has no layout and
    /// seeds the default formation instead.
    #[must_use]
    pub fn with_formation(formation: Formation, orientation: Orientation) -> Self {
        let (formation, seeds) = match formation.seed_positions(orientation) {
            Some(seeds) => (formation, seeds),
            None => {
                let fallback = Formation::default();
                match fallback.seed_positions(orientation) {
                    Some(seeds) => (fallback, seeds),
                    // The default formation always has a catalog entry.
                    None => (fallback, Vec::new()),
                }
            }
        };
        let players = seed_roster(&seeds, PLAYER_COLOR);
        Self {
            players,
            opponents: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            ball: PITCH_CENTER,
            ui: UiStates { orientation, selected_formation: formation, ..UiStates::default() },
        }
    }

    /// Replace the player roster with catalog positions for
    /// `formation`/`orientation`; clears opponents, lines, and texts,
    /// resets the ball to center, and drops the toggles that depended on
    /// the cleared entities. No-op for `Custom`.
    pub fn load_formation(&mut self, formation: Formation, orientation: Orientation) {
        let Some(seeds) = formation.seed_positions(orientation) else {
            return;
        };
        self.players = seed_roster(&seeds, PLAYER_COLOR);
        self.opponents.clear();
        self.lines.clear();
        self.texts.clear();
        self.ball = PITCH_CENTER;
        self.ui.orientation = orientation;
        self.ui.selected_formation = formation;
        self.ui.show_opponents = false;
        self.ui.show_numbers = false;
    }

    /// Restore every player to its seeded position. Opponents, lines, and
    /// texts are untouched.
    pub fn reset_positions(&mut self) {
        for player in &mut self.players {
            player.x = player.initial_x;
            player.y = player.initial_y;
        }
    }

    /// Toggle the opponent roster. Turning it on seeds the default layout
    /// for the current orientation when the roster is empty and keeps prior
    /// positions otherwise; turning it off empties the roster.
    pub fn set_show_opponents(&mut self, on: bool) {
        self.ui.show_opponents = on;
        if on {
            self.populate_opponents_if_empty();
        } else {
            self.opponents.clear();
        }
    }

    /// Seed the default opponent layout if the roster is empty.
    pub fn populate_opponents_if_empty(&mut self) {
        if self.opponents.is_empty() {
            let seeds = formation::seed_opponents(self.ui.orientation);
            self.opponents = seed_roster(&seeds, OPPONENT_COLOR);
        }
    }

    /// True when any player sits more than the catalog tolerance away from
    /// its seeded position on either axis.
    #[must_use]
    pub fn has_custom_positions(&self) -> bool {
        self.players.iter().any(|p| {
            (p.x - p.initial_x).abs() > CUSTOM_TOLERANCE
                || (p.y - p.initial_y).abs() > CUSTOM_TOLERANCE
        })
    }

    #[must_use]
    pub fn player_mut(&mut self, id: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    #[must_use]
    pub fn opponent_mut(&mut self, id: u32) -> Option<&mut Player> {
        self.opponents.iter_mut().find(|p| p.id == id)
    }

    #[must_use]
    pub fn text_mut(&mut self, id: &str) -> Option<&mut TextLabel> {
        self.texts.iter_mut().find(|t| t.id == id)
    }
}

fn seed_roster(seeds: &[Point], color: &str) -> Vec<Player> {
    (0u32..).zip(seeds).map(|(id, &pos)| Player::seeded(id, pos, color)).collect()
}
