//! Literal substring search
//!
//! Plain byte-by-byte scan over the flattened document, wrapping around the
//! ends. No regex support.

use crate::error::{EditorError, EditorResult};

/// Stores the active search pattern and scans text for it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEngine {
    pattern: Vec<u8>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pattern, truncated to `max_len` bytes
    ///
    /// Valid UTF-8 is cut on a char boundary; other bytes are kept as given.
    pub fn set_pattern(&mut self, pattern: &[u8], max_len: usize) {
        let mut end = pattern.len().min(max_len);
        if let Ok(text) = std::str::from_utf8(pattern) {
            while !text.is_char_boundary(end) {
                end -= 1;
            }
        }
        self.pattern = pattern[..end].to_vec();
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    fn matches_at(&self, text: &[u8], start: usize) -> bool {
        text.get(start..start + self.pattern.len()) == Some(self.pattern.as_slice())
    }

    /// First match starting at or after `from`, wrapping to the start of
    /// `text` when nothing follows
    pub fn find_next(&self, text: &[u8], from: usize) -> EditorResult<usize> {
        if self.pattern.is_empty() {
            return Err(EditorError::EmptyPattern);
        }
        let last_start = text
            .len()
            .checked_sub(self.pattern.len())
            .ok_or(EditorError::NotFound)?;

        (from..=last_start)
            .chain(0..from.min(last_start + 1))
            .find(|start| self.matches_at(text, *start))
            .ok_or(EditorError::NotFound)
    }

    /// Last match ending at or before `from`, wrapping to the end of `text`
    /// when nothing precedes it
    pub fn find_prev(&self, text: &[u8], from: usize) -> EditorResult<usize> {
        if self.pattern.is_empty() {
            return Err(EditorError::EmptyPattern);
        }
        let last_start = text
            .len()
            .checked_sub(self.pattern.len())
            .ok_or(EditorError::NotFound)?;
        let before = from
            .min(text.len())
            .checked_sub(self.pattern.len())
            .map(|limit| limit + 1)
            .unwrap_or(0);

        (0..before)
            .rev()
            .chain((before..=last_start).rev())
            .find(|start| self.matches_at(text, *start))
            .ok_or(EditorError::NotFound)
    }
}
