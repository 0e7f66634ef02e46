//! Cursor state and navigation motions
//!
//! `position` is authoritative. `line` and `column` are re-derived from it
//! through the line index at the end of every motion, so they are never stale
//! once a public call returns. Motions never fail; they clamp to the buffer.

use serde::{Deserialize, Serialize};

use crate::buffer::TextBuffer;
use crate::config::EditorConfig;

/// Navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Motion {
    /// `h`
    Left,
    /// `l`
    Right,
    /// `j`
    Down,
    /// `k`
    Up,
    /// `w`
    WordForward,
    /// `b`
    WordBackward,
    /// `e`
    WordEnd,
    /// `0`
    LineStart,
    /// `$`
    LineEnd,
    /// `gg`
    BufferStart,
    /// `G`
    BufferEnd,
}

/// Cursor position with derived line/column and the sticky column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub position: usize,
    pub line: usize,
    pub column: usize,
    /// Target column for vertical motions
    pub preferred_column: usize,
}

impl Cursor {
    pub const fn zero() -> Self {
        Self {
            position: 0,
            line: 0,
            column: 0,
            preferred_column: 0,
        }
    }

    /// Re-derives `line`/`column` from `position`, clamping it to the buffer
    pub fn sync(&mut self, buffer: &TextBuffer) {
        self.position = self.position.min(buffer.len());
        let (line, column) = buffer.lines().line_of_position(self.position);
        self.line = line;
        self.column = column;
    }

    /// Moves to `position` and makes the resulting column sticky
    pub fn jump_to(&mut self, position: usize, buffer: &TextBuffer) {
        self.position = position;
        self.sync(buffer);
        self.preferred_column = self.column;
    }

    /// Applies `motion` against `buffer`
    pub fn apply(&mut self, motion: Motion, buffer: &TextBuffer, config: &EditorConfig) {
        // Keep derived state honest even if the buffer changed underneath
        self.sync(buffer);
        let len = buffer.len();
        let is_blank = |position: usize| {
            buffer
                .char_at(position)
                .is_some_and(|byte| config.is_blank(byte))
        };

        match motion {
            Motion::Left => {
                if self.position > 0 {
                    self.jump_to(self.position - 1, buffer);
                }
            }
            Motion::Right => {
                if self.position < len {
                    self.jump_to(self.position + 1, buffer);
                }
            }
            Motion::Down => {
                if self.line + 1 < buffer.line_count() {
                    self.move_vertically(self.line + 1, buffer);
                }
            }
            Motion::Up => {
                if self.line > 0 {
                    self.move_vertically(self.line - 1, buffer);
                }
            }
            Motion::WordForward => {
                let mut pos = self.position;
                while pos < len && !is_blank(pos) {
                    pos += 1;
                }
                while pos < len && is_blank(pos) {
                    pos += 1;
                }
                self.jump_to(pos, buffer);
            }
            Motion::WordBackward => {
                if self.position == 0 {
                    return;
                }
                let mut pos = self.position - 1;
                while pos > 0 && is_blank(pos) {
                    pos -= 1;
                }
                while pos > 0 && !is_blank(pos - 1) {
                    pos -= 1;
                }
                self.jump_to(pos, buffer);
            }
            Motion::WordEnd => {
                if len == 0 {
                    return;
                }
                let mut pos = self.position;
                if pos < len {
                    pos += 1;
                }
                while pos < len && is_blank(pos) {
                    pos += 1;
                }
                while pos + 1 < len && !is_blank(pos + 1) {
                    pos += 1;
                }
                self.jump_to(pos, buffer);
            }
            Motion::LineStart => {
                let start = buffer.lines().line_start(self.line);
                self.jump_to(start, buffer);
            }
            Motion::LineEnd => {
                let lines = buffer.lines();
                let start = lines.line_start(self.line);
                let last = start + lines.content_len(self.line).saturating_sub(1);
                self.jump_to(last, buffer);
            }
            Motion::BufferStart => self.jump_to(0, buffer),
            Motion::BufferEnd => {
                let lines = buffer.lines();
                let start = lines.line_start(lines.line_count() - 1);
                self.jump_to(start, buffer);
            }
        }
    }

    /// Moves to `target` line at the sticky column, clamped to the line
    /// content; `preferred_column` itself is left untouched
    fn move_vertically(&mut self, target: usize, buffer: &TextBuffer) {
        let lines = buffer.lines();
        let column = self.preferred_column.min(lines.content_len(target));
        self.position = lines.line_start(target) + column;
        self.sync(buffer);
    }
}
