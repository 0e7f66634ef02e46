//! # Editor Core
//!
//! Piece-table text editing engine with vim-style modal navigation.
//!
//! ## Philosophy
//!
//! - **Deterministic**: Same operation trace => same session state
//! - **Modal editing**: Normal, Insert, Visual, Command, Search modes
//! - **Mechanism over policy**: The core edits and navigates, hosts decide rendering and IO
//! - **Atomic failures**: A rejected operation leaves the session untouched
//!
//! ## Design
//!
//! The core provides:
//! - TextBuffer: Piece table over an immutable original and an append-only add buffer
//! - LineIndex: Line start offsets, rebuilt lazily after edits
//! - Cursor / Motion: Byte-offset cursor with vim motions and a sticky column
//! - ModeState: Active mode and the visual selection anchor
//! - SearchEngine: Literal pattern search with wraparound
//! - DocumentSession: The object hosts drive, one operation at a time
//! - apply_key / CoreOutcome: Optional key routing through per-mode handlers
//! - EditorSnapshot: Serializable state for replay and parity testing

pub mod buffer;
pub mod command;
pub mod config;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod key;
pub mod line_index;
pub mod mode;
pub mod search;
pub mod session;
pub mod snapshot;

pub use buffer::{Piece, PieceSource, TextBuffer};
pub use command::{parse_command, Command};
pub use config::EditorConfig;
pub use cursor::{Cursor, Motion};
pub use dispatch::CoreOutcome;
pub use error::{EditorError, EditorResult};
pub use key::Key;
pub use line_index::LineIndex;
pub use mode::{EditorMode, ModeState};
pub use search::SearchEngine;
pub use session::DocumentSession;
pub use snapshot::EditorSnapshot;
