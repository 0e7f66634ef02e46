//! Piece table text buffer
//!
//! The document is an ordered list of pieces, each a `(source, start, len)`
//! reference into one of two backing stores:
//!
//! - ORIGINAL: the text supplied at creation, never modified
//! - ADDED: an append-only log of every inserted byte
//!
//! ```text
//! original: "Hello World"
//! insert "Beautiful " at 6
//! added:    "Beautiful "
//! pieces:   [(Original, 0, 6), (Added, 0, 10), (Original, 6, 5)]
//! text:     "Hello Beautiful World"
//! ```
//!
//! Edits only add, remove or split piece descriptors; stored bytes never move.

use std::cell::OnceCell;

use tracing::trace;

use crate::error::{EditorError, EditorResult};
use crate::line_index::LineIndex;

/// Backing store a piece refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceSource {
    /// Text supplied when the buffer was created
    Original,
    /// Append-only scratch area of inserted text
    Added,
}

/// A span of one backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub source: PieceSource,
    pub start: usize,
    pub len: usize,
}

impl Piece {
    const fn new(source: PieceSource, start: usize, len: usize) -> Self {
        Self { source, start, len }
    }
}

/// Piece table text buffer
#[derive(Debug, Clone)]
pub struct TextBuffer {
    original: Box<[u8]>,
    added: Vec<u8>,
    pieces: Vec<Piece>,
    len: usize,
    /// Cleared on every edit, rebuilt on the next read
    lines: OnceCell<LineIndex>,
}

impl TextBuffer {
    /// Creates an empty buffer
    pub fn new() -> Self {
        Self::with_capacity(b"", 0)
    }

    /// Creates a buffer whose ORIGINAL store holds `text`
    pub fn from_text(text: &str) -> Self {
        Self::with_capacity(text.as_bytes(), 0)
    }

    /// Creates a buffer from raw bytes, reserving `add_capacity` bytes for
    /// inserted text
    pub fn with_capacity(text: &[u8], add_capacity: usize) -> Self {
        let pieces = if text.is_empty() {
            Vec::new()
        } else {
            vec![Piece::new(PieceSource::Original, 0, text.len())]
        };
        Self {
            original: text.into(),
            added: Vec::with_capacity(add_capacity),
            pieces,
            len: text.len(),
            lines: OnceCell::new(),
        }
    }

    /// Total document length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current piece descriptors, in document order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    fn source(&self, piece: &Piece) -> &[u8] {
        let store: &[u8] = match piece.source {
            PieceSource::Original => &self.original,
            PieceSource::Added => &self.added,
        };
        &store[piece.start..piece.start + piece.len]
    }

    /// Finds the piece containing `position` and the offset inside it
    ///
    /// `position == len()` maps to `(piece_count(), 0)`.
    fn locate(&self, position: usize) -> Option<(usize, usize)> {
        let mut piece_start = 0;
        for (index, piece) in self.pieces.iter().enumerate() {
            if position < piece_start + piece.len {
                return Some((index, position - piece_start));
            }
            piece_start += piece.len;
        }
        (position == self.len).then_some((self.pieces.len(), 0))
    }

    fn invalidate_lines(&mut self) {
        self.lines.take();
    }

    /// Inserts `text` at `position`
    pub fn insert(&mut self, position: usize, text: &[u8]) -> EditorResult<()> {
        if position > self.len {
            return Err(EditorError::out_of_range(position, text.len(), self.len));
        }
        if text.is_empty() {
            return Ok(());
        }
        let (index, offset) = self
            .locate(position)
            .ok_or_else(|| EditorError::out_of_range(position, text.len(), self.len))?;

        let added_start = self.added.len();
        self.added.extend_from_slice(text);
        let new_piece = Piece::new(PieceSource::Added, added_start, text.len());

        // Typing at the end of the latest ADDED piece grows it in place
        let extends_previous = offset == 0
            && index
                .checked_sub(1)
                .and_then(|i| self.pieces.get(i))
                .is_some_and(|prev| {
                    prev.source == PieceSource::Added && prev.start + prev.len == added_start
                });

        if offset > 0 {
            // Split the containing piece around the new text
            let piece = self.pieces[index];
            let right = Piece::new(piece.source, piece.start + offset, piece.len - offset);
            self.pieces[index].len = offset;
            self.pieces.insert(index + 1, right);
            self.pieces.insert(index + 1, new_piece);
        } else if extends_previous {
            self.pieces[index - 1].len += text.len();
        } else {
            self.pieces.insert(index, new_piece);
        }

        self.len += text.len();
        self.invalidate_lines();
        trace!(position, len = text.len(), pieces = self.pieces.len(), "insert");
        Ok(())
    }

    /// Deletes `length` bytes starting at `position`
    pub fn delete(&mut self, position: usize, length: usize) -> EditorResult<()> {
        let end = position
            .checked_add(length)
            .filter(|end| *end <= self.len)
            .ok_or_else(|| EditorError::out_of_range(position, length, self.len))?;
        if length == 0 {
            return Ok(());
        }
        let out_of_range = || EditorError::out_of_range(position, length, self.len);
        let (first, first_offset) = self.locate(position).ok_or_else(out_of_range)?;
        let (last, last_offset) = self.locate(end).ok_or_else(out_of_range)?;

        if first == last {
            // Both ends inside one piece
            let piece = self.pieces[first];
            if first_offset == 0 {
                self.pieces[first].start += length;
                self.pieces[first].len -= length;
            } else {
                let right =
                    Piece::new(piece.source, piece.start + last_offset, piece.len - last_offset);
                self.pieces[first].len = first_offset;
                self.pieces.insert(first + 1, right);
            }
        } else {
            self.pieces[first].len = first_offset;
            if let Some(piece) = self.pieces.get_mut(last) {
                piece.start += last_offset;
                piece.len -= last_offset;
            }
            self.pieces.drain(first + 1..last);
        }
        self.pieces.retain(|piece| piece.len > 0);

        self.len -= length;
        self.invalidate_lines();
        trace!(position, length, pieces = self.pieces.len(), "delete");
        Ok(())
    }

    /// Replaces `old_len` bytes at `position` with `text`
    ///
    /// Fails without touching the buffer if the deleted range is invalid.
    pub fn replace(&mut self, position: usize, old_len: usize, text: &[u8]) -> EditorResult<()> {
        self.delete(position, old_len)?;
        self.insert(position, text)
    }

    /// Byte at `position`, if any
    pub fn char_at(&self, position: usize) -> Option<u8> {
        let (index, offset) = self.locate(position)?;
        self.pieces.get(index).map(|piece| self.source(piece)[offset])
    }

    /// Copies `length` bytes starting at `start`
    pub fn text_range(&self, start: usize, length: usize) -> EditorResult<Vec<u8>> {
        let end = start
            .checked_add(length)
            .filter(|end| *end <= self.len)
            .ok_or_else(|| EditorError::out_of_range(start, length, self.len))?;

        let mut out = Vec::with_capacity(length);
        let mut piece_start = 0;
        for piece in &self.pieces {
            if piece_start >= end {
                break;
            }
            let piece_end = piece_start + piece.len;
            if piece_end > start {
                let from = start.saturating_sub(piece_start);
                let to = end.min(piece_end) - piece_start;
                out.extend_from_slice(&self.source(piece)[from..to]);
            }
            piece_start = piece_end;
        }
        Ok(out)
    }

    /// Flattens the whole document
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for piece in &self.pieces {
            out.extend_from_slice(self.source(piece));
        }
        out
    }

    /// Flattens the whole document as text (invalid UTF-8 is replaced)
    pub fn full_text(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }

    /// Line index for the current contents, rebuilt after edits
    pub fn lines(&self) -> &LineIndex {
        self.lines.get_or_init(|| {
            let index = LineIndex::build(&self.to_bytes());
            trace!(lines = index.line_count(), "line index rebuilt");
            index
        })
    }

    pub fn line_count(&self) -> usize {
        self.lines().line_count()
    }

    /// Line content without its terminator, `None` past the last line
    pub fn line_text(&self, line: usize) -> Option<Vec<u8>> {
        let lines = self.lines();
        if line >= lines.line_count() {
            return None;
        }
        self.text_range(lines.line_start(line), lines.content_len(line)).ok()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TextBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.to_bytes() == other.to_bytes()
    }
}

impl Eq for TextBuffer {}
