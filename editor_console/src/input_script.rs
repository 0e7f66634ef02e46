//! # Input Script Parser
//!
//! Provides a simple scripted input format for deterministic replays and demos.
//!
//! ## Format
//!
//! Scripts are line-based, with each line representing one input action:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Delete`, `Tab`, `Space`
//! - Arrow keys: `Up`, `Down`, `Left`, `Right`
//! - Single characters: `i`, `G`, `$`, `:`
//! - Text strings: `"Hello World"` (expanded to individual key presses)
//! - Comments: `# This is a comment`
//!
//! ## Example
//!
//! ```text
//! # Type a greeting, then jump back to the top
//! i
//! "Hello Mix"
//! Escape
//! g
//! g
//! ```

use std::collections::VecDeque;

use editor_core::Key;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// Parsed key sequence, consumed front to back
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    keys: VecDeque<Key>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut keys = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            keys.extend(Self::parse_line(line, line_num + 1)?);
        }

        if keys.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { keys })
    }

    fn parse_line(line: &str, line_num: usize) -> Result<Vec<Key>, InputScriptError> {
        if let Some(text) = line
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            return Ok(text.chars().map(Key::Char).collect());
        }

        let key = Self::parse_key(line).map_err(|e| InputScriptError::ParseError {
            line: line_num,
            message: e.to_string(),
        })?;
        Ok(vec![key])
    }

    /// Parses a key name
    fn parse_key(name: &str) -> Result<Key, InputScriptError> {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(ch));
        }

        match name.to_lowercase().as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "escape" | "esc" => Ok(Key::Escape),
            "backspace" | "back" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "tab" => Ok(Key::Tab),
            "space" => Ok(Key::Char(' ')),

            "up" | "arrowup" => Ok(Key::Up),
            "down" | "arrowdown" => Ok(Key::Down),
            "left" | "arrowleft" => Ok(Key::Left),
            "right" | "arrowright" => Ok(Key::Right),

            _ => Err(InputScriptError::InvalidKeyName(name.to_string())),
        }
    }

    /// Returns the next key, if any
    pub fn next_input(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }

    pub fn has_more(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Returns the number of remaining keys
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_key() {
        let mut script = InputScript::from_text("a").unwrap();
        assert_eq!(script.remaining(), 1);
        assert_eq!(script.next_input(), Some(Key::Char('a')));
        assert!(!script.has_more());
    }

    #[test]
    fn test_parse_special_keys() {
        let mut script = InputScript::from_text("Enter\nEscape\nBackspace\nDel\nSpace").unwrap();
        assert_eq!(script.next_input(), Some(Key::Enter));
        assert_eq!(script.next_input(), Some(Key::Escape));
        assert_eq!(script.next_input(), Some(Key::Backspace));
        assert_eq!(script.next_input(), Some(Key::Delete));
        assert_eq!(script.next_input(), Some(Key::Char(' ')));
    }

    #[test]
    fn test_parse_punctuation_keys() {
        let mut script = InputScript::from_text("$\n:\n/\nG").unwrap();
        assert_eq!(script.next_input(), Some(Key::Char('$')));
        assert_eq!(script.next_input(), Some(Key::Char(':')));
        assert_eq!(script.next_input(), Some(Key::Char('/')));
        assert_eq!(script.next_input(), Some(Key::Char('G')));
    }

    #[test]
    fn test_parse_quoted_string() {
        let mut script = InputScript::from_text(r#""Hi there""#).unwrap();
        assert_eq!(script.remaining(), 8);
        assert_eq!(script.next_input(), Some(Key::Char('H')));
        assert_eq!(script.next_input(), Some(Key::Char('i')));
        assert_eq!(script.next_input(), Some(Key::Char(' ')));
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let script = InputScript::from_text("# Comment\na\n\n# Another comment\nb\n\n").unwrap();
        assert_eq!(script.remaining(), 2);
    }

    #[test]
    fn test_empty_script_error() {
        assert_eq!(
            InputScript::from_text("").unwrap_err(),
            InputScriptError::EmptyScript
        );
        assert_eq!(
            InputScript::from_text("# Just comments\n# Nothing else").unwrap_err(),
            InputScriptError::EmptyScript
        );
    }

    #[test]
    fn test_invalid_key_name() {
        let result = InputScript::from_text("a\nInvalidKeyName");
        assert_eq!(
            result.unwrap_err(),
            InputScriptError::ParseError {
                line: 2,
                message: "Invalid key name: InvalidKeyName".into(),
            }
        );
    }

    #[test]
    fn test_complex_script() {
        let script = InputScript::from_text(
            r#"
            # Open a line and type
            i
            "Hello Mix"
            Escape
            ":q!"
            Enter
        "#,
        )
        .unwrap();

        // i + 9 chars + Escape + 3 chars + Enter = 15
        assert_eq!(script.remaining(), 15);
    }
}
