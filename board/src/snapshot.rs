//! Current snapshot format and stored-format detection.
//!
//! Boards persist as JSON. The current layout is a flat object of named
//! sections tagged `format: 2`, with every coordinate in logical pitch
//! space; earlier boards persisted the rendered scene tree handled by
//! [`crate::scene`]. [`decode`] detects which of the two a stored value
//! is and routes accordingly, so a database can hold a mix of both.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{AnnotationLine, BoardState, Player, TextLabel, UiStates};
use crate::pitch::Point;
use crate::scene;

/// Format tag written into every current-format snapshot.
pub const FORMAT_VERSION: u32 = 2;

/// Wire layout of the current format. Sections missing from a stored
/// value fall back to the default board's sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Snapshot {
    format: u32,
    players: Vec<Player>,
    opponents: Vec<Player>,
    annotations: Vec<AnnotationLine>,
    texts: Vec<TextLabel>,
    ball: Point,
    ui: UiStates,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::from_board(&BoardState::default())
    }
}

impl Snapshot {
    fn from_board(board: &BoardState) -> Self {
        Self {
            format: FORMAT_VERSION,
            players: board.players.clone(),
            opponents: board.opponents.clone(),
            annotations: board.lines.clone(),
            texts: board.texts.clone(),
            ball: board.ball,
            ui: board.ui,
        }
    }

    fn into_board(self) -> BoardState {
        let mut board = BoardState {
            players: self.players,
            opponents: self.opponents,
            lines: self.annotations,
            texts: self.texts,
            ball: self.ball,
            ui: self.ui,
        };
        if !board.ui.show_opponents {
            board.opponents.clear();
        }
        board
    }
}

/// Serialize a board into the current named-section format.
#[must_use]
pub fn encode(board: &BoardState) -> Value {
    // Serializing these types into a Value is infallible; non-finite
    // floats become nulls rather than errors.
    serde_json::to_value(Snapshot::from_board(board)).unwrap_or_default()
}

/// Deserialize any stored snapshot value.
///
/// Current-format objects parse directly; values carrying a `stageData`
/// tree go through the legacy scene reader; anything else yields a
/// default board.
#[must_use]
pub fn decode(value: &Value) -> BoardState {
    if value.get("format").and_then(Value::as_u64) == Some(u64::from(FORMAT_VERSION)) {
        return serde_json::from_value::<Snapshot>(value.clone())
            .map_or_else(|_| BoardState::default(), Snapshot::into_board);
    }
    if value.get("stageData").is_some() {
        return scene::decode(value);
    }
    BoardState::default()
}
