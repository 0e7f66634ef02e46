//! Editor snapshot for deterministic state comparison

use serde::{Deserialize, Serialize};

use crate::mode::EditorMode;

/// Observable session state at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub mode: EditorMode,
    pub position: usize,
    pub line: usize,
    pub column: usize,
    pub preferred_column: usize,
    /// `(start, end)` of the VISUAL selection
    pub selection: Option<(usize, usize)>,
    pub text: String,
    pub search_pattern: String,
    pub dirty: bool,
}

impl EditorSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in replay tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update(self.mode.code().to_le_bytes());

        for value in [
            self.position,
            self.line,
            self.column,
            self.preferred_column,
        ] {
            hasher.update(value.to_le_bytes());
        }

        match self.selection {
            Some((start, end)) => {
                hasher.update([1u8]);
                hasher.update(start.to_le_bytes());
                hasher.update(end.to_le_bytes());
            }
            None => hasher.update([0u8]),
        }

        // Length prefixes keep text/pattern boundaries unambiguous
        hasher.update(self.text.len().to_le_bytes());
        hasher.update(self.text.as_bytes());
        hasher.update(self.search_pattern.len().to_le_bytes());
        hasher.update(self.search_pattern.as_bytes());

        hasher.update([self.dirty as u8]);

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EditorSnapshot {
        EditorSnapshot {
            mode: EditorMode::Normal,
            position: 0,
            line: 0,
            column: 0,
            preferred_column: 0,
            selection: None,
            text: "hello\nworld".into(),
            search_pattern: String::new(),
            dirty: false,
        }
    }

    #[test]
    fn test_snapshot_hash_deterministic() {
        let snapshot = sample();
        assert_eq!(snapshot.hash(), snapshot.clone().hash());
    }

    #[test]
    fn test_snapshot_hash_different_for_different_state() {
        let moved = EditorSnapshot {
            position: 1,
            column: 1,
            preferred_column: 1,
            ..sample()
        };
        assert_ne!(sample().hash(), moved.hash());

        let selecting = EditorSnapshot {
            mode: EditorMode::Visual,
            selection: Some((0, 0)),
            ..sample()
        };
        assert_ne!(sample().hash(), selecting.hash());
    }

    #[test]
    fn test_snapshot_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"mode\":\"Normal\""));
        let back: EditorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
