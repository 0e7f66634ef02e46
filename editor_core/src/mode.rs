//! Editor modes and the selection anchor

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EditorError, EditorResult};

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorMode {
    /// Normal mode (navigation and commands)
    Normal,
    /// Insert mode (text entry)
    Insert,
    /// Visual mode (range selection)
    Visual,
    /// Command line (ex commands like :q)
    CommandLine,
    /// Search prompt
    SearchInput,
}

impl EditorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::Visual => "VISUAL",
            EditorMode::CommandLine => "COMMAND",
            EditorMode::SearchInput => "SEARCH",
        }
    }

    /// Numeric code used across the embedding boundary
    pub fn code(&self) -> i32 {
        match self {
            EditorMode::Normal => 0,
            EditorMode::Insert => 1,
            EditorMode::Visual => 2,
            EditorMode::CommandLine => 3,
            EditorMode::SearchInput => 4,
        }
    }

    pub fn from_code(code: i32) -> EditorResult<Self> {
        match code {
            0 => Ok(EditorMode::Normal),
            1 => Ok(EditorMode::Insert),
            2 => Ok(EditorMode::Visual),
            3 => Ok(EditorMode::CommandLine),
            4 => Ok(EditorMode::SearchInput),
            other => Err(EditorError::InvalidMode(other)),
        }
    }
}

/// Active mode plus the VISUAL selection anchor
///
/// The anchor exists only while the mode is VISUAL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeState {
    mode: EditorMode,
    anchor: Option<usize>,
}

impl ModeState {
    pub fn new() -> Self {
        Self {
            mode: EditorMode::Normal,
            anchor: None,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Switches to `mode`; entering VISUAL anchors the selection at `cursor`
    pub fn set_mode(&mut self, mode: EditorMode, cursor: usize) {
        self.anchor = match mode {
            EditorMode::Visual => Some(cursor),
            _ => None,
        };
        if self.mode != mode {
            debug!(from = self.mode.as_str(), to = mode.as_str(), "mode change");
        }
        self.mode = mode;
    }

    /// Selected byte range `[min(anchor, cursor), max(anchor, cursor))`
    pub fn selection(&self, cursor: usize) -> Option<Range<usize>> {
        self.anchor
            .map(|anchor| anchor.min(cursor)..anchor.max(cursor))
    }

    /// Keeps the anchor inside a buffer that shrank to `len`
    pub(crate) fn clamp_anchor(&mut self, len: usize) {
        if let Some(anchor) = self.anchor.as_mut() {
            *anchor = (*anchor).min(len);
        }
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_strings() {
        assert_eq!(EditorMode::Normal.as_str(), "NORMAL");
        assert_eq!(EditorMode::Insert.as_str(), "INSERT");
        assert_eq!(EditorMode::Visual.as_str(), "VISUAL");
        assert_eq!(EditorMode::CommandLine.as_str(), "COMMAND");
        assert_eq!(EditorMode::SearchInput.as_str(), "SEARCH");
    }

    #[test]
    fn test_mode_codes() {
        for code in 0..5 {
            assert_eq!(EditorMode::from_code(code).unwrap().code(), code);
        }
        assert_eq!(EditorMode::from_code(5), Err(EditorError::InvalidMode(5)));
        assert_eq!(EditorMode::from_code(-1), Err(EditorError::InvalidMode(-1)));
    }

    #[test]
    fn test_visual_captures_anchor() {
        let mut state = ModeState::new();
        state.set_mode(EditorMode::Visual, 7);
        assert_eq!(state.anchor(), Some(7));
        assert_eq!(state.selection(3), Some(3..7));
        assert_eq!(state.selection(9), Some(7..9));
    }

    #[test]
    fn test_leaving_visual_discards_anchor() {
        let mut state = ModeState::new();
        state.set_mode(EditorMode::Visual, 2);
        state.set_mode(EditorMode::Normal, 4);
        assert_eq!(state.anchor(), None);
        assert_eq!(state.selection(4), None);

        state.set_mode(EditorMode::Visual, 1);
        state.set_mode(EditorMode::Insert, 1);
        assert_eq!(state.selection(1), None);
    }

    #[test]
    fn test_other_modes_record_only() {
        let mut state = ModeState::new();
        for mode in [
            EditorMode::Insert,
            EditorMode::CommandLine,
            EditorMode::SearchInput,
        ] {
            state.set_mode(mode, 5);
            assert_eq!(state.mode(), mode);
            assert_eq!(state.anchor(), None);
        }
    }
}
