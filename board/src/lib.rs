//! Tactics-board core for the football planner.
//!
//! This crate owns everything about a board that is independent of HTTP and
//! the rendering frontend: the logical pitch coordinate system, the formation
//! catalog, the board state itself, the editing operations that mutate it
//! (drags, drawing gestures, text labels, toggles), linear undo/redo, and the
//! two persisted encodings of a board. The API server stores and returns the
//! encoded snapshots; the editor frontend is responsible only for rendering
//! the state and feeding pointer events into [`editor::Editor`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`pitch`] | Logical pitch space and display projections |
//! | [`formation`] | Named formation catalog and default opponent layout |
//! | [`model`] | Board state: players, annotations, text labels, toggles |
//! | [`history`] | Linear undo/redo over board snapshots |
//! | [`editor`] | Editing operations and the drawing gesture machine |
//! | [`scene`] | Legacy scene-graph snapshot format (read + write) |
//! | [`snapshot`] | Named-section snapshot format and format detection |

pub mod editor;
pub mod formation;
pub mod history;
pub mod model;
pub mod pitch;
pub mod scene;
pub mod snapshot;
