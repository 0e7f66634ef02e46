//! Line index
//!
//! Maps line numbers to byte offsets. The index is derived entirely from the
//! buffer contents and rebuilt in full after edits; it is never updated
//! incrementally.

/// Line terminator byte
pub const LINE_TERMINATOR: u8 = b'\n';

/// Byte offsets of every line start in a document
///
/// `starts[0]` is always 0. A trailing terminator opens a final empty line,
/// so the index always holds at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Builds the index with a single scan over `text`
    pub fn build(text: &[u8]) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.iter()
                .enumerate()
                .filter(|(_, b)| **b == LINE_TERMINATOR)
                .map(|(i, _)| i + 1),
        );
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines (at least 1)
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    fn clamp_line(&self, line: usize) -> usize {
        line.min(self.starts.len() - 1)
    }

    /// Byte offset where `line` starts; clamps to the last line
    pub fn line_start(&self, line: usize) -> usize {
        self.starts[self.clamp_line(line)]
    }

    /// Exclusive end of `line`, including its terminator if present
    fn line_end(&self, line: usize) -> usize {
        let line = self.clamp_line(line);
        self.starts.get(line + 1).copied().unwrap_or(self.len)
    }

    /// Length of `line` including a trailing terminator if present
    pub fn line_len(&self, line: usize) -> usize {
        self.line_end(line) - self.line_start(line)
    }

    /// Length of `line` without its terminator
    pub fn content_len(&self, line: usize) -> usize {
        let line = self.clamp_line(line);
        let len = self.line_len(line);
        if line + 1 < self.starts.len() {
            len - 1
        } else {
            len
        }
    }

    /// Translates a byte offset to `(line, column)`
    ///
    /// Offsets past the end are treated as the end of the document.
    pub fn line_of_position(&self, position: usize) -> (usize, usize) {
        let position = position.min(self.len);
        let line = match self.starts.binary_search(&position) {
            Ok(line) => line,
            Err(line) => line - 1,
        };
        (line, position - self.starts[line])
    }

    /// Translates `(line, column)` to a byte offset
    ///
    /// The line clamps to the last line and the column to the line length.
    pub fn position_of(&self, line: usize, column: usize) -> usize {
        let line = self.clamp_line(line);
        self.starts[line] + column.min(self.line_len(line))
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::build(&[])
    }
}
