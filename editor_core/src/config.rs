//! Editor configuration
//!
//! Typed settings with baked-in defaults. Hosts may override them from a
//! JSON document; fields missing from the document keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// Default initial reserve of the ADDED storage
pub const DEFAULT_ADD_CAPACITY: usize = 4096;

/// Default maximum stored search pattern length in bytes
pub const DEFAULT_MAX_PATTERN_LEN: usize = 255;

/// Default blank bytes for word motions
pub const DEFAULT_WORD_SEPARATORS: &str = " \t\n";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial capacity reserved for inserted text
    pub add_capacity: usize,
    /// Longer search patterns are truncated when stored
    pub max_pattern_len: usize,
    /// Bytes treated as blanks by `w`, `b` and `e`
    pub word_separators: String,
}

impl EditorConfig {
    /// Parses a configuration from JSON
    pub fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(|e| EditorError::InvalidConfig(e.to_string()))
    }

    /// Serializes the configuration to pretty JSON
    pub fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EditorError::InvalidConfig(e.to_string()))
    }

    /// Returns true if `byte` separates words
    pub fn is_blank(&self, byte: u8) -> bool {
        self.word_separators.as_bytes().contains(&byte)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            add_capacity: DEFAULT_ADD_CAPACITY,
            max_pattern_len: DEFAULT_MAX_PATTERN_LEN,
            word_separators: DEFAULT_WORD_SEPARATORS.to_string(),
        }
    }
}
