//! Editing operations: drags, toggles, drawing gestures, text, undo/redo.
//!
//! [`Editor`] owns one [`BoardState`] together with its [`History`] and the
//! transient per-session editing state (active tool, stroke color, brush
//! size, drawing gesture). Hosts feed pointer events and toolbar actions
//! into these methods; nothing here touches persistence.
//!
//! History discipline follows the editor this models: player drags and
//! completed drawing gestures commit entries, `clear_all` commits exactly
//! one entry for the whole sweep, and everything else (opponent and ball
//! drags, text edits, deletes, formation loads) rides along in the next
//! commit. Invalid ids are tolerated as no-ops throughout; a stale id from
//! a UI race must never crash the editor.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::formation::Formation;
use crate::history::{Entry, History};
use crate::model::{
    AnnotationLine, BoardState, DEFAULT_LINE_COLOR, DEFAULT_STROKE_WIDTH, DrawMode,
    MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, TextLabel,
};
use crate::pitch::{Orientation, Point};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Draw a directed arrow.
    Arrow,
    /// Draw a straight line segment.
    Line,
    /// Draw a freehand stroke.
    Freehand,
    /// Erase previously drawn strokes.
    Eraser,
    /// Place a text label.
    Text,
}

impl Tool {
    /// The annotation mode this tool draws in, or `None` for tools that do
    /// not start drawing gestures.
    #[must_use]
    pub fn draw_mode(self) -> Option<DrawMode> {
        match self {
            Self::Arrow => Some(DrawMode::Arrow),
            Self::Line => Some(DrawMode::Line),
            Self::Freehand => Some(DrawMode::Freehand),
            Self::Eraser => Some(DrawMode::Eraser),
            Self::Select | Self::Text => None,
        }
    }
}

/// The drawing gesture state machine: `Idle -> Drawing -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A line is being drawn; it lives at the tail of `board.lines`.
    Drawing,
}

/// One board under edit, with history and transient tool state.
pub struct Editor {
    pub board: BoardState,
    pub history: History,
    pub gesture: Gesture,
    pub tool: Tool,
    pub color: String,
    pub brush_size: f64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// An editor over a freshly seeded default board.
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(BoardState::default())
    }

    /// An editor over an existing board (typically a decoded snapshot).
    /// The board's current state becomes the initial history entry.
    #[must_use]
    pub fn with_board(board: BoardState) -> Self {
        let history = History::new(Entry::capture(&board));
        Self {
            board,
            history,
            gesture: Gesture::Idle,
            tool: Tool::Select,
            color: DEFAULT_LINE_COLOR.to_string(),
            brush_size: DEFAULT_STROKE_WIDTH,
        }
    }

    // --- Formation / orientation ---

    /// Load a catalog formation at the current orientation. No-op for
    /// `Custom`.
    pub fn select_formation(&mut self, formation: Formation) {
        let orientation = self.board.ui.orientation;
        self.board.load_formation(formation, orientation);
    }

    /// Switch the display orientation. Logical coordinates are
    /// orientation-invariant, so entity positions are untouched; an empty
    /// opponent roster is reseeded for the new orientation when the toggle
    /// is on.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.board.ui.orientation = orientation;
        if self.board.ui.show_opponents {
            self.board.populate_opponents_if_empty();
        }
    }

    // --- Toggles ---

    pub fn set_show_ball(&mut self, on: bool) {
        self.board.ui.show_ball = on;
    }

    pub fn set_show_grid(&mut self, on: bool) {
        self.board.ui.show_grid = on;
    }

    pub fn set_show_numbers(&mut self, on: bool) {
        self.board.ui.show_numbers = on;
    }

    pub fn set_show_opponents(&mut self, on: bool) {
        self.board.set_show_opponents(on);
    }

    // --- Drags ---

    /// Move a player and commit. A drag beyond the catalog tolerance flips
    /// the formation to `custom`; the flip is one-way until a formation is
    /// loaded again.
    pub fn drag_player(&mut self, id: u32, pos: Point) {
        let Some(player) = self.board.player_mut(id) else {
            return;
        };
        player.x = pos.x;
        player.y = pos.y;
        if !self.board.ui.selected_formation.is_custom() && self.board.has_custom_positions() {
            self.board.ui.selected_formation = Formation::Custom;
        }
        self.commit();
    }

    /// Move an opponent. Does not touch the formation flag or history.
    pub fn drag_opponent(&mut self, id: u32, pos: Point) {
        if let Some(opponent) = self.board.opponent_mut(id) {
            opponent.x = pos.x;
            opponent.y = pos.y;
        }
    }

    /// Move the ball. Rides along in the next commit.
    pub fn drag_ball(&mut self, pos: Point) {
        self.board.ball = pos;
    }

    /// Restore every player to its seeded position.
    pub fn reset_positions(&mut self) {
        self.board.reset_positions();
    }

    // --- Tool state ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    /// Set the brush size, clamped to the slider range.
    pub fn set_brush_size(&mut self, size: f64) {
        self.brush_size = size.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    // --- Drawing gestures ---

    /// Begin an annotation at `point` with the current color and brush.
    /// Segment modes seed both endpoints at `point`; stroke modes seed a
    /// single point. No-op while another gesture is active.
    pub fn start_annotation(&mut self, mode: DrawMode, point: Point) {
        if self.gesture != Gesture::Idle {
            return;
        }
        let points = if mode.is_segment() { vec![point, point] } else { vec![point] };
        self.board.lines.push(AnnotationLine {
            points,
            color: self.color.clone(),
            stroke_width: self.brush_size,
            mode,
        });
        self.gesture = Gesture::Drawing;
    }

    /// Extend the in-progress annotation: segment modes move the endpoint,
    /// stroke modes append. No-op unless a gesture is active.
    pub fn extend_annotation(&mut self, point: Point) {
        if self.gesture != Gesture::Drawing {
            return;
        }
        let Some(line) = self.board.lines.last_mut() else {
            return;
        };
        if line.mode.is_segment() {
            if let Some(end) = line.points.last_mut() {
                *end = point;
            }
        } else {
            line.points.push(point);
        }
    }

    /// Finish the in-progress annotation and commit. No-op when idle.
    pub fn commit_annotation(&mut self) {
        if self.gesture != Gesture::Drawing {
            return;
        }
        self.gesture = Gesture::Idle;
        self.commit();
    }

    /// Remove one annotation line by index. Out-of-range is a no-op.
    pub fn delete_line(&mut self, index: usize) {
        if index < self.board.lines.len() {
            self.board.lines.remove(index);
        }
    }

    /// Drop every annotation line.
    pub fn clear_lines(&mut self) {
        self.board.lines.clear();
    }

    // --- Text labels ---

    /// Place a new text label at `point` and return its id. The active
    /// tool falls back to `Select`, as placing a label ends text mode.
    pub fn add_text(&mut self, point: Point) -> String {
        let id = self.next_text_id();
        self.board.texts.push(TextLabel::placed(id.clone(), point));
        self.tool = Tool::Select;
        id
    }

    /// Update a label's content and any present geometry fields, closing
    /// its edit mode. Unknown ids are a no-op.
    pub fn edit_text(&mut self, id: &str, text: &str, geometry: TextGeometry) {
        let Some(label) = self.board.text_mut(id) else {
            return;
        };
        label.text = text.to_string();
        if let Some(x) = geometry.x {
            label.x = x;
        }
        if let Some(y) = geometry.y {
            label.y = y;
        }
        if let Some(width) = geometry.width {
            label.width = width;
        }
        if let Some(rotation) = geometry.rotation {
            label.rotation = rotation;
        }
        label.editing = false;
    }

    /// Delete a label by id. Unknown ids are a no-op.
    pub fn delete_text(&mut self, id: &str) {
        self.board.texts.retain(|t| t.id != id);
    }

    // --- Bulk ---

    /// Reset positions, clear every toggle, annotation, and text, and
    /// restore the default stroke color. Commits exactly one history entry
    /// for the whole sweep.
    pub fn clear_all(&mut self) {
        self.board.reset_positions();
        self.board.set_show_opponents(false);
        self.board.ui.show_ball = false;
        self.board.ui.show_grid = false;
        self.board.ui.show_numbers = false;
        self.board.lines.clear();
        self.board.texts.clear();
        self.color = DEFAULT_LINE_COLOR.to_string();
        self.commit();
    }

    // --- History ---

    /// Step back one history entry. Returns false at the start.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                entry.restore(&mut self.board);
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry. Returns false at the end.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                entry.restore(&mut self.board);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self) {
        self.history.commit(Entry::capture(&self.board));
    }

    /// Millisecond-epoch token, bumped past any label id already on the
    /// board so rapid successive placements stay unique.
    fn next_text_id(&self) -> String {
        let mut millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        while self.board.texts.iter().any(|t| t.id == millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }
}

/// Sparse geometry update for a text label. Only present fields are
/// applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextGeometry {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub rotation: Option<f64>,
}
