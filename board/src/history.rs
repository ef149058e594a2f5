//! Linear undo/redo over committed board snapshots.
//!
//! The history is an ordered list of [`Entry`] values with a cursor at the
//! current state. Committing after one or more undos truncates the
//! redoable tail before appending, the classic branching-history rule.
//! Entries are deep copies on both write ([`Entry::capture`]) and read
//! (`undo`/`redo` return owned clones), so a stored entry can never alias
//! live board state; an aliasing bug here would silently corrupt undo.
//!
//! Display toggles are deliberately not part of an entry: undo restores
//! what is on the board, not how it is shown.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::model::{AnnotationLine, BoardState, Player, TextLabel};
use crate::pitch::Point;

/// One committed board state: everything undo restores.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub players: Vec<Player>,
    pub opponents: Vec<Player>,
    pub lines: Vec<AnnotationLine>,
    pub texts: Vec<TextLabel>,
    pub ball: Point,
}

impl Entry {
    /// Deep-copy the undoable portion of `board`.
    #[must_use]
    pub fn capture(board: &BoardState) -> Self {
        Self {
            players: board.players.clone(),
            opponents: board.opponents.clone(),
            lines: board.lines.clone(),
            texts: board.texts.clone(),
            ball: board.ball,
        }
    }

    /// Write this entry back into `board`, leaving display toggles as they
    /// are.
    pub fn restore(&self, board: &mut BoardState) {
        board.players = self.players.clone();
        board.opponents = self.opponents.clone();
        board.lines = self.lines.clone();
        board.texts = self.texts.clone();
        board.ball = self.ball;
    }
}

/// Ordered entries plus a cursor at the current state.
#[derive(Debug)]
pub struct History {
    entries: Vec<Entry>,
    cursor: usize,
}

impl History {
    /// A history whose first entry is the given initial state, so the first
    /// undo after one commit can return to it.
    #[must_use]
    pub fn new(initial: Entry) -> Self {
        Self { entries: vec![initial], cursor: 0 }
    }

    /// Append an entry, discarding any redoable entries past the cursor.
    pub fn commit(&mut self, entry: Entry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry and return a copy of it, or `None` at the start.
    #[must_use]
    pub fn undo(&mut self) -> Option<Entry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry and return a copy of it, or `None` at the
    /// end.
    #[must_use]
    pub fn redo(&mut self) -> Option<Entry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of committed entries, including the initial state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, 0-based from the initial state.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
