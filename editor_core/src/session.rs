//! Document session
//!
//! The root object of the engine: one text buffer, one cursor, one mode
//! state and one search pattern. Callers issue one operation at a time and
//! re-render from the returned state.

use std::ops::Range;

use tracing::debug;

use crate::buffer::TextBuffer;
use crate::config::EditorConfig;
use crate::cursor::{Cursor, Motion};
use crate::error::{EditorError, EditorResult};
use crate::mode::{EditorMode, ModeState};
use crate::search::SearchEngine;
use crate::snapshot::EditorSnapshot;

/// Single-document editing session
#[derive(Debug, Clone)]
pub struct DocumentSession {
    config: EditorConfig,
    buffer: TextBuffer,
    cursor: Cursor,
    modes: ModeState,
    search: SearchEngine,
    /// Match the last search landed on, forgotten once the cursor moves
    last_match: Option<usize>,
    dirty: bool,
    pub(crate) input: PendingInput,
}

/// Key dispatch state that spans several keystrokes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PendingInput {
    /// First key of a two-key normal mode command (`gg`, `dd`)
    pub operator: Option<char>,
    /// Text typed on the command line
    pub command_line: String,
    /// Text typed at the search prompt
    pub search_query: String,
}

impl DocumentSession {
    /// Creates an empty session
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let buffer = TextBuffer::with_capacity(b"", config.add_capacity);
        Self {
            config,
            buffer,
            cursor: Cursor::zero(),
            modes: ModeState::new(),
            search: SearchEngine::new(),
            last_match: None,
            dirty: false,
            input: PendingInput::default(),
        }
    }

    /// Creates a session holding `text`
    pub fn from_text(text: &str) -> Self {
        let mut session = Self::new();
        session.load_text(text);
        session
    }

    /// Replaces the document, resetting cursor and mode
    pub fn load_text(&mut self, text: &str) {
        self.load_bytes(text.as_bytes());
    }

    pub fn load_bytes(&mut self, text: &[u8]) {
        self.buffer = TextBuffer::with_capacity(text, self.config.add_capacity);
        self.cursor = Cursor::zero();
        self.modes = ModeState::new();
        self.last_match = None;
        self.dirty = false;
        self.input = PendingInput::default();
        debug!(len = text.len(), "document loaded");
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // Buffer queries

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// Whole document as text
    pub fn text(&self) -> String {
        self.buffer.full_text()
    }

    /// Whole document as raw bytes
    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.to_bytes()
    }

    /// Line `n` without its terminator, `None` past the last line
    pub fn line_text(&self, line: usize) -> Option<String> {
        self.buffer
            .line_text(line)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// True once the document changed since it was loaded
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // Buffer mutation

    /// Inserts `text` at `position`
    pub fn insert(&mut self, position: usize, text: &str) -> EditorResult<()> {
        self.insert_bytes(position, text.as_bytes())
    }

    pub fn insert_bytes(&mut self, position: usize, text: &[u8]) -> EditorResult<()> {
        self.buffer.insert(position, text)?;
        self.after_edit(!text.is_empty());
        Ok(())
    }

    /// Deletes `length` bytes at `position`
    pub fn delete(&mut self, position: usize, length: usize) -> EditorResult<()> {
        self.buffer.delete(position, length)?;
        self.after_edit(length > 0);
        Ok(())
    }

    /// Replaces `old_len` bytes at `position` with `text`
    pub fn replace(&mut self, position: usize, old_len: usize, text: &str) -> EditorResult<()> {
        self.buffer.replace(position, old_len, text.as_bytes())?;
        self.after_edit(old_len > 0 || !text.is_empty());
        Ok(())
    }

    fn after_edit(&mut self, changed: bool) {
        if !changed {
            return;
        }
        self.dirty = true;
        self.last_match = None;
        self.modes.clamp_anchor(self.buffer.len());
        self.cursor.sync(&self.buffer);
    }

    /// Inserts `text` at the cursor and moves past it
    pub fn insert_at_cursor(&mut self, text: &str) -> EditorResult<()> {
        self.insert_at_cursor_bytes(text.as_bytes())
    }

    pub fn insert_at_cursor_bytes(&mut self, text: &[u8]) -> EditorResult<()> {
        let position = self.cursor.position;
        self.insert_bytes(position, text)?;
        self.cursor.jump_to(position + text.len(), &self.buffer);
        Ok(())
    }

    /// Deletes the byte before the cursor (backspace)
    pub fn delete_before_cursor(&mut self) -> EditorResult<()> {
        let position = self.cursor.position;
        if position == 0 {
            return Err(EditorError::out_of_range(0, 1, self.buffer.len()));
        }
        self.delete(position - 1, 1)?;
        self.cursor.jump_to(position - 1, &self.buffer);
        Ok(())
    }

    /// Deletes the byte under the cursor (`x`)
    pub fn delete_at_cursor(&mut self) -> EditorResult<()> {
        self.delete(self.cursor.position, 1)
    }

    /// Deletes the cursor line including its terminator (`dd`)
    pub fn delete_current_line(&mut self) -> EditorResult<()> {
        let lines = self.buffer.lines();
        let start = lines.line_start(self.cursor.line);
        let len = lines.line_len(self.cursor.line);
        if len == 0 {
            // Final empty line: take the terminator that opens it instead
            if start == 0 {
                return Ok(());
            }
            self.delete(start - 1, 1)?;
            let previous = self.buffer.lines().line_start(self.cursor.line.saturating_sub(1));
            self.cursor.jump_to(previous, &self.buffer);
            return Ok(());
        }
        self.delete(start, len)?;
        self.cursor.jump_to(start, &self.buffer);
        Ok(())
    }

    /// Deletes the VISUAL selection and returns to NORMAL
    pub fn delete_selection(&mut self) -> EditorResult<()> {
        let range = self
            .selection()
            .ok_or_else(|| EditorError::InvalidState("no active selection".into()))?;
        self.delete(range.start, range.len())?;
        self.cursor.jump_to(range.start, &self.buffer);
        self.set_mode(EditorMode::Normal);
        Ok(())
    }

    // Cursor

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor.position
    }

    pub fn cursor_line(&self) -> usize {
        self.cursor.line
    }

    pub fn cursor_column(&self) -> usize {
        self.cursor.column
    }

    /// Moves the cursor, clamping to `[0, len]`
    pub fn set_position(&mut self, position: usize) {
        self.cursor.jump_to(position, &self.buffer);
        self.last_match = None;
    }

    /// Applies a navigation motion
    pub fn apply_motion(&mut self, motion: Motion) {
        self.cursor.apply(motion, &self.buffer, &self.config);
        self.last_match = None;
    }

    // Mode

    pub fn mode(&self) -> EditorMode {
        self.modes.mode()
    }

    pub fn mode_name(&self) -> &'static str {
        self.modes.mode().as_str()
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.modes.set_mode(mode, self.cursor.position);
        self.input.operator = None;
    }

    /// Sets the mode from its numeric code; unknown codes change nothing
    pub fn set_mode_code(&mut self, code: i32) -> EditorResult<()> {
        let mode = EditorMode::from_code(code)?;
        self.set_mode(mode);
        Ok(())
    }

    // Selection

    pub fn has_selection(&self) -> bool {
        self.modes.anchor().is_some()
    }

    /// Selected range while in VISUAL mode
    pub fn selection(&self) -> Option<Range<usize>> {
        self.modes.selection(self.cursor.position)
    }

    /// Selection start, or the cursor when nothing is selected
    pub fn selection_start(&self) -> usize {
        self.selection()
            .map_or(self.cursor.position, |range| range.start)
    }

    /// Selection end, or the cursor when nothing is selected
    pub fn selection_end(&self) -> usize {
        self.selection()
            .map_or(self.cursor.position, |range| range.end)
    }

    // Search

    pub fn set_search_pattern(&mut self, pattern: &str) {
        self.set_search_pattern_bytes(pattern.as_bytes());
    }

    pub fn set_search_pattern_bytes(&mut self, pattern: &[u8]) {
        self.search.set_pattern(pattern, self.config.max_pattern_len);
        self.last_match = None;
    }

    pub fn search_pattern(&self) -> String {
        String::from_utf8_lossy(self.search.pattern()).into_owned()
    }

    /// Moves to the next match at or after the cursor, wrapping around
    ///
    /// When the cursor has not moved since the previous search landed the
    /// scan starts one byte later, so repeating the call walks the matches.
    pub fn search_next(&mut self) -> EditorResult<usize> {
        let from = match self.last_match {
            Some(found) if found == self.cursor.position => found + 1,
            _ => self.cursor.position,
        };
        let found = self.search.find_next(&self.buffer.to_bytes(), from)?;
        self.land_on_match(found);
        Ok(found)
    }

    /// Moves to the previous match ending at or before the cursor, wrapping
    pub fn search_prev(&mut self) -> EditorResult<usize> {
        let found = self
            .search
            .find_prev(&self.buffer.to_bytes(), self.cursor.position)?;
        self.land_on_match(found);
        Ok(found)
    }

    fn land_on_match(&mut self, found: usize) {
        self.cursor.jump_to(found, &self.buffer);
        self.last_match = Some(found);
        debug!(position = found, "search match");
    }

    /// Captures the observable session state
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            mode: self.mode(),
            position: self.cursor.position,
            line: self.cursor.line,
            column: self.cursor.column,
            preferred_column: self.cursor.preferred_column,
            selection: self.selection().map(|range| (range.start, range.end)),
            text: self.text(),
            search_pattern: self.search_pattern(),
            dirty: self.dirty,
        }
    }
}

impl Default for DocumentSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = DocumentSession::new();
        assert_eq!(session.len(), 0);
        assert_eq!(session.line_count(), 1);
        assert_eq!(session.mode(), EditorMode::Normal);
        assert_eq!(session.cursor(), Cursor::zero());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_load_resets_state() {
        let mut session = DocumentSession::from_text("abc");
        session.set_position(2);
        session.set_mode(EditorMode::Visual);
        session.insert(0, "x").unwrap();

        session.load_text("new");
        assert_eq!(session.text(), "new");
        assert_eq!(session.cursor_position(), 0);
        assert_eq!(session.mode(), EditorMode::Normal);
        assert!(!session.has_selection());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_delete_clamps_cursor() {
        let mut session = DocumentSession::from_text("hello world");
        session.set_position(11);
        session.delete(0, 6).unwrap();
        assert_eq!(session.text(), "world");
        assert_eq!(session.cursor_position(), 5);
    }

    #[test]
    fn test_failed_insert_leaves_state() {
        let mut session = DocumentSession::from_text("abc");
        session.set_position(1);
        let before = session.snapshot();
        assert!(session.insert(10, "x").is_err());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_replace_marks_dirty_and_syncs_cursor() {
        let mut session = DocumentSession::from_text("hello world");
        session.set_position(11);
        session.replace(6, 5, "rust\nfans").unwrap();
        assert_eq!(session.text(), "hello rust\nfans");
        assert!(session.is_dirty());
        assert_eq!(session.cursor_position(), 11);
        assert_eq!(session.cursor_line(), 1);
        assert_eq!(session.cursor_column(), 0);

        session.replace(0, 15, "").unwrap();
        assert_eq!(session.text(), "");
        assert_eq!(session.cursor_position(), 0);
    }

    #[test]
    fn test_failed_replace_leaves_state() {
        let mut session = DocumentSession::from_text("abc");
        session.set_position(2);
        let before = session.snapshot();
        assert!(session.replace(1, 5, "xyz").is_err());
        assert!(session.replace(4, 0, "xyz").is_err());
        assert_eq!(session.snapshot(), before);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_insert_at_cursor_raw_bytes() {
        let mut session = DocumentSession::new();
        session.load_bytes(b"ab\xffcd");
        session.insert_at_cursor_bytes(b"\xfe").unwrap();
        assert_eq!(session.bytes(), b"\xfeab\xffcd".to_vec());
        assert_eq!(session.len(), 6);
        assert_eq!(session.cursor_position(), 1);
    }

    #[test]
    fn test_insert_at_cursor_advances() {
        let mut session = DocumentSession::from_text("ad");
        session.set_position(1);
        session.insert_at_cursor("bc").unwrap();
        assert_eq!(session.text(), "abcd");
        assert_eq!(session.cursor_position(), 3);
    }

    #[test]
    fn test_backspace_and_delete_at_cursor() {
        let mut session = DocumentSession::from_text("abc");
        session.set_position(2);
        session.delete_before_cursor().unwrap();
        assert_eq!(session.text(), "ac");
        assert_eq!(session.cursor_position(), 1);

        session.delete_at_cursor().unwrap();
        assert_eq!(session.text(), "a");
        assert_eq!(session.cursor_position(), 1);
        assert!(session.delete_at_cursor().is_err());

        session.set_position(0);
        assert!(session.delete_before_cursor().is_err());
        assert_eq!(session.text(), "a");
    }

    #[test]
    fn test_delete_current_line() {
        let mut session = DocumentSession::from_text("line1\nline2\nline3");
        session.set_position(7);
        session.delete_current_line().unwrap();
        assert_eq!(session.text(), "line1\nline3");
        assert_eq!(session.cursor_position(), 6);

        session.set_position(8);
        session.delete_current_line().unwrap();
        assert_eq!(session.text(), "line1\n");
        assert_eq!(session.cursor_line(), 1);

        session.delete_current_line().unwrap();
        assert_eq!(session.text(), "line1");
        assert_eq!(session.cursor_position(), 0);
    }

    #[test]
    fn test_selection_follows_cursor() {
        let mut session = DocumentSession::from_text("hello world");
        session.set_position(6);
        assert!(!session.has_selection());
        assert_eq!(session.selection_start(), 6);
        assert_eq!(session.selection_end(), 6);

        session.set_mode(EditorMode::Visual);
        session.apply_motion(Motion::BufferStart);
        assert!(session.has_selection());
        assert_eq!(session.selection(), Some(0..6));

        session.delete_selection().unwrap();
        assert_eq!(session.text(), "world");
        assert_eq!(session.mode(), EditorMode::Normal);
        assert!(!session.has_selection());
    }

    #[test]
    fn test_set_mode_code() {
        let mut session = DocumentSession::new();
        session.set_mode_code(1).unwrap();
        assert_eq!(session.mode_name(), "INSERT");
        assert!(session.set_mode_code(42).is_err());
        assert_eq!(session.mode(), EditorMode::Insert);
    }

    #[test]
    fn test_search_walks_matches() {
        let mut session = DocumentSession::from_text("abcXabc");
        session.set_search_pattern("abc");
        session.set_position(4);
        assert_eq!(session.search_next(), Ok(4));
        assert_eq!(session.search_next(), Ok(0));
        assert_eq!(session.search_next(), Ok(4));
        assert_eq!(session.search_prev(), Ok(0));
    }

    #[test]
    fn test_search_after_moving_back_onto_match() {
        let mut session = DocumentSession::from_text("abcXabc");
        session.set_search_pattern("abc");
        session.set_position(4);
        assert_eq!(session.search_next(), Ok(4));

        session.apply_motion(Motion::Left);
        session.apply_motion(Motion::Right);
        assert_eq!(session.cursor_position(), 4);
        assert_eq!(session.search_next(), Ok(4));

        session.set_position(4);
        assert_eq!(session.search_next(), Ok(4));
        assert_eq!(session.search_next(), Ok(0));
    }

    #[test]
    fn test_search_raw_byte_pattern() {
        let mut session = DocumentSession::new();
        session.load_bytes(b"ab\xffcd");
        session.set_search_pattern_bytes(b"\xff");
        assert_eq!(session.search_next(), Ok(2));
        assert_eq!(session.cursor_position(), 2);
    }

    #[test]
    fn test_search_failure_keeps_cursor() {
        let mut session = DocumentSession::from_text("hello");
        session.set_position(3);
        assert_eq!(session.search_next(), Err(EditorError::EmptyPattern));
        session.set_search_pattern("zzz");
        assert_eq!(session.search_next(), Err(EditorError::NotFound));
        assert_eq!(session.search_prev(), Err(EditorError::NotFound));
        assert_eq!(session.cursor_position(), 3);
    }

    #[test]
    fn test_search_updates_preferred_column() {
        let mut session = DocumentSession::from_text("xx foo\nshort\nanother");
        session.set_search_pattern("foo");
        session.search_next().unwrap();
        assert_eq!(session.cursor().preferred_column, 3);
        session.apply_motion(Motion::Down);
        session.apply_motion(Motion::Down);
        assert_eq!(session.cursor_column(), 3);
    }
}
