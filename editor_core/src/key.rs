//! Platform-independent key representation

use serde::{Deserialize, Serialize};

/// Key event fed to [`DocumentSession::apply_key`](crate::DocumentSession::apply_key)
///
/// Letters and punctuation arrive as `Char`; what they mean depends on the
/// mode handling them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),

    // Navigation
    Left,
    Right,
    Up,
    Down,

    // Special keys
    Enter,
    Backspace,
    Delete,
    Escape,
    Tab,
}

impl Key {
    /// Convert a raw terminal byte to a key
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            0x1B => Some(Key::Escape),
            0x08 | 0x7F => Some(Key::Backspace),
            b'\r' | b'\n' => Some(Key::Enter),
            b'\t' => Some(Key::Tab),
            ch if (0x20..0x7F).contains(&ch) => Some(Key::Char(ch as char)),
            _ => None,
        }
    }

    /// Text this key types in insert mode, if any
    pub fn typed_text(&self) -> Option<char> {
        match self {
            Key::Char(ch) => Some(*ch),
            Key::Tab => Some('\t'),
            Key::Enter => Some('\n'),
            _ => None,
        }
    }
}
