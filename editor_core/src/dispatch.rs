//! Key dispatch
//!
//! Routes key events through the handler for the active mode. Hosts that
//! prefer to drive the session directly can ignore this module; it only
//! calls the public session operations.

use tracing::trace;

use crate::command::{parse_command, Command};
use crate::cursor::Motion;
use crate::key::Key;
use crate::mode::EditorMode;
use crate::session::DocumentSession;

/// Outcome from applying a key to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Continue editing (no state change)
    Continue,
    /// State changed (buffer modified, mode changed, cursor moved)
    Changed,
    /// Display a status message
    StatusMessage(String),
    /// Request to exit the editor
    RequestExit { forced: bool },
}

/// Motion bound to a normal/visual mode key
fn motion_for(key: Key) -> Option<Motion> {
    let motion = match key {
        Key::Char('h') | Key::Left => Motion::Left,
        Key::Char('l') | Key::Right => Motion::Right,
        Key::Char('j') | Key::Down => Motion::Down,
        Key::Char('k') | Key::Up => Motion::Up,
        Key::Char('w') => Motion::WordForward,
        Key::Char('b') => Motion::WordBackward,
        Key::Char('e') => Motion::WordEnd,
        Key::Char('0') => Motion::LineStart,
        Key::Char('$') => Motion::LineEnd,
        Key::Char('G') => Motion::BufferEnd,
        _ => return None,
    };
    Some(motion)
}

impl DocumentSession {
    /// Apply a key event and return the outcome
    pub fn apply_key(&mut self, key: Key) -> CoreOutcome {
        trace!(?key, mode = self.mode_name(), "apply key");
        match self.mode() {
            EditorMode::Normal => self.handle_normal_mode(key),
            EditorMode::Insert => self.handle_insert_mode(key),
            EditorMode::Visual => self.handle_visual_mode(key),
            EditorMode::CommandLine => self.handle_command_mode(key),
            EditorMode::SearchInput => self.handle_search_mode(key),
        }
    }

    /// Text typed so far on the `:` line
    pub fn command_line(&self) -> &str {
        &self.input.command_line
    }

    /// Text typed so far at the `/` prompt
    pub fn search_query(&self) -> &str {
        &self.input.search_query
    }

    fn motion(&mut self, motion: Motion) -> CoreOutcome {
        self.apply_motion(motion);
        CoreOutcome::Changed
    }

    fn handle_normal_mode(&mut self, key: Key) -> CoreOutcome {
        // Second key of `gg` / `dd`
        match (self.input.operator.take(), key) {
            (Some('g'), Key::Char('g')) => return self.motion(Motion::BufferStart),
            (Some('d'), Key::Char('d')) => {
                return match self.delete_current_line() {
                    Ok(()) => CoreOutcome::Changed,
                    Err(err) => CoreOutcome::StatusMessage(err.to_string()),
                };
            }
            _ => {}
        }

        if let Some(motion) = motion_for(key) {
            return self.motion(motion);
        }

        match key {
            Key::Char(op @ ('g' | 'd')) => {
                self.input.operator = Some(op);
                CoreOutcome::Continue
            }
            Key::Char('i') => {
                self.set_mode(EditorMode::Insert);
                CoreOutcome::Changed
            }
            Key::Char('a') => {
                // Step past the character under the cursor, never past the line end
                let lines = self.buffer().lines();
                let line_end =
                    lines.line_start(self.cursor_line()) + lines.content_len(self.cursor_line());
                if self.cursor_position() < line_end {
                    self.set_position(self.cursor_position() + 1);
                }
                self.set_mode(EditorMode::Insert);
                CoreOutcome::Changed
            }
            Key::Char('v') => {
                self.set_mode(EditorMode::Visual);
                CoreOutcome::Changed
            }
            Key::Char('x') => match self.delete_at_cursor() {
                Ok(()) => CoreOutcome::Changed,
                Err(_) => CoreOutcome::Continue,
            },
            Key::Char(':') => {
                self.input.command_line.clear();
                self.set_mode(EditorMode::CommandLine);
                CoreOutcome::Changed
            }
            Key::Char('/') => {
                self.input.search_query.clear();
                self.set_mode(EditorMode::SearchInput);
                CoreOutcome::Changed
            }
            Key::Char('n') => self.search_outcome(true),
            Key::Char('N') => self.search_outcome(false),
            _ => CoreOutcome::Continue,
        }
    }

    fn handle_insert_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Escape => {
                // vi steps back onto the last typed character
                let column = self.cursor_column();
                self.set_mode(EditorMode::Normal);
                if column > 0 {
                    self.set_position(self.cursor_position() - 1);
                }
                CoreOutcome::Changed
            }
            Key::Backspace => match self.delete_before_cursor() {
                Ok(()) => CoreOutcome::Changed,
                Err(_) => CoreOutcome::Continue,
            },
            Key::Delete => match self.delete_at_cursor() {
                Ok(()) => CoreOutcome::Changed,
                Err(_) => CoreOutcome::Continue,
            },
            Key::Left => self.motion(Motion::Left),
            Key::Right => self.motion(Motion::Right),
            Key::Up => self.motion(Motion::Up),
            Key::Down => self.motion(Motion::Down),
            other => match other.typed_text() {
                Some(ch) => {
                    let mut utf8 = [0u8; 4];
                    match self.insert_at_cursor(ch.encode_utf8(&mut utf8)) {
                        Ok(()) => CoreOutcome::Changed,
                        Err(err) => CoreOutcome::StatusMessage(err.to_string()),
                    }
                }
                None => CoreOutcome::Continue,
            },
        }
    }

    fn handle_visual_mode(&mut self, key: Key) -> CoreOutcome {
        if let (Some('g'), Key::Char('g')) = (self.input.operator.take(), key) {
            return self.motion(Motion::BufferStart);
        }

        if let Some(motion) = motion_for(key) {
            return self.motion(motion);
        }

        match key {
            Key::Char('g') => {
                self.input.operator = Some('g');
                CoreOutcome::Continue
            }
            Key::Char('d' | 'x') => match self.delete_selection() {
                Ok(()) => CoreOutcome::Changed,
                Err(err) => CoreOutcome::StatusMessage(err.to_string()),
            },
            Key::Escape | Key::Char('v') => {
                self.set_mode(EditorMode::Normal);
                CoreOutcome::Changed
            }
            _ => CoreOutcome::Continue,
        }
    }

    fn handle_command_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Escape => {
                // Cancel command
                self.input.command_line.clear();
                self.set_mode(EditorMode::Normal);
                CoreOutcome::Changed
            }
            Key::Enter => {
                let line = std::mem::take(&mut self.input.command_line);
                self.set_mode(EditorMode::Normal);
                self.execute_command(&line)
            }
            Key::Backspace => {
                self.input.command_line.pop();
                CoreOutcome::Changed
            }
            Key::Char(ch) => {
                self.input.command_line.push(ch);
                CoreOutcome::Changed
            }
            _ => CoreOutcome::Continue,
        }
    }

    fn handle_search_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Escape => {
                // Cancel search
                self.input.search_query.clear();
                self.set_mode(EditorMode::Normal);
                CoreOutcome::Changed
            }
            Key::Enter => {
                // An empty prompt repeats the stored pattern
                let query = std::mem::take(&mut self.input.search_query);
                if !query.is_empty() {
                    self.set_search_pattern(&query);
                }
                self.set_mode(EditorMode::Normal);
                self.search_outcome(true)
            }
            Key::Backspace => {
                self.input.search_query.pop();
                CoreOutcome::Changed
            }
            Key::Char(ch) => {
                self.input.search_query.push(ch);
                CoreOutcome::Changed
            }
            _ => CoreOutcome::Continue,
        }
    }

    fn search_outcome(&mut self, forward: bool) -> CoreOutcome {
        let result = if forward {
            self.search_next()
        } else {
            self.search_prev()
        };
        match result {
            Ok(_) => CoreOutcome::Changed,
            Err(err) => CoreOutcome::StatusMessage(err.to_string()),
        }
    }

    fn execute_command(&mut self, line: &str) -> CoreOutcome {
        match parse_command(line) {
            Command::GotoLine(number) => {
                let target = number.saturating_sub(1);
                let start = self.buffer().lines().line_start(target);
                self.set_position(start);
                CoreOutcome::Changed
            }
            Command::LastLine => self.motion(Motion::BufferEnd),
            Command::Quit { force } => {
                if self.is_dirty() && !force {
                    CoreOutcome::StatusMessage(
                        "No write since last change (use :q! to override)".into(),
                    )
                } else {
                    CoreOutcome::RequestExit { forced: force }
                }
            }
            Command::Unknown(cmd_str) => {
                CoreOutcome::StatusMessage(format!("Unknown command: {}", cmd_str))
            }
        }
    }
}
