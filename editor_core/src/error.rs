//! Editor error types

use thiserror::Error;

/// Errors reported by the editing engine
///
/// A call that returns an error leaves the document session exactly as it
/// was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A position/length argument falls outside the current document
    #[error("Range {position}+{length} is outside the buffer (length {buffer_len})")]
    OutOfRange {
        position: usize,
        length: usize,
        buffer_len: usize,
    },

    /// The search pattern does not occur anywhere in the document
    #[error("Pattern not found")]
    NotFound,

    /// A search was requested without a pattern
    #[error("No search pattern set")]
    EmptyPattern,

    /// Operation requires an initialized session
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Unknown numeric mode code
    #[error("Invalid mode code: {0}")]
    InvalidMode(i32),

    /// Configuration document could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Editor result
pub type EditorResult<T> = Result<T, EditorError>;

impl EditorError {
    pub(crate) fn out_of_range(position: usize, length: usize, buffer_len: usize) -> Self {
        EditorError::OutOfRange {
            position,
            length,
            buffer_len,
        }
    }
}
