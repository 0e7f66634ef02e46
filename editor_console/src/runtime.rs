//! # Console Runtime
//!
//! Loads a document, replays a key script through the session and renders
//! the resulting state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use editor_core::{CoreOutcome, DocumentSession, EditorConfig, EditorError, Key};
use thiserror::Error;
use tracing::{debug, info};

use crate::input_script::{InputScript, InputScriptError};

/// Console error types
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a file, tagging failures with its path
pub fn read_file(path: &Path) -> Result<Vec<u8>, ConsoleError> {
    fs::read(path).map_err(|source| ConsoleError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Console configuration
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    /// Document to open; takes precedence over `text`
    pub file: Option<PathBuf>,
    /// Inline document contents
    pub text: Option<String>,
    /// Key script source
    pub script: Option<String>,
    /// Engine settings
    pub editor: EditorConfig,
    /// Print the final snapshot as JSON
    pub json: bool,
}

/// Console runtime
pub struct ConsoleRuntime {
    session: DocumentSession,
    script: InputScript,
    json: bool,
    steps: usize,
    /// Latest status message reported by the session
    status: Option<String>,
    exit_requested: bool,
}

impl ConsoleRuntime {
    /// Creates a runtime with its document loaded and script parsed
    pub fn new(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        let mut session = DocumentSession::with_config(config.editor);
        match (&config.file, &config.text) {
            (Some(path), _) => session.load_bytes(&read_file(path)?),
            (None, Some(text)) => session.load_text(text),
            (None, None) => {}
        }

        let script = match &config.script {
            Some(text) => InputScript::from_text(text)?,
            None => InputScript::new(),
        };
        info!(
            len = session.len(),
            keys = script.remaining(),
            "console runtime ready"
        );

        Ok(Self {
            session,
            script,
            json: config.json,
            steps: 0,
            status: None,
            exit_requested: false,
        })
    }

    /// Replays the script until it runs out or the session asks to exit
    pub fn run(&mut self) {
        while !self.exit_requested {
            let Some(key) = self.script.next_input() else {
                break;
            };
            self.step(key);
        }
        info!(steps = self.steps, "script finished");
    }

    /// Feeds one key to the session
    pub fn step(&mut self, key: Key) -> CoreOutcome {
        self.steps += 1;
        let outcome = self.session.apply_key(key);
        match &outcome {
            CoreOutcome::StatusMessage(message) => {
                debug!(%message, "status");
                self.status = Some(message.clone());
            }
            CoreOutcome::RequestExit { forced } => {
                debug!(forced, "exit requested");
                self.exit_requested = true;
            }
            CoreOutcome::Continue | CoreOutcome::Changed => {}
        }
        outcome
    }

    /// Renders the final state in the configured format
    pub fn output(&self) -> Result<String, ConsoleError> {
        if self.json {
            self.render_json()
        } else {
            Ok(self.render())
        }
    }

    /// Plain-text status block followed by the document
    pub fn render(&self) -> String {
        let session = &self.session;
        let mut out = format!(
            "mode: {}\ncursor: line {}, column {} (position {})\n",
            session.mode_name(),
            session.cursor_line() + 1,
            session.cursor_column() + 1,
            session.cursor_position()
        );
        if let Some(range) = session.selection() {
            out.push_str(&format!("selection: {}..{}\n", range.start, range.end));
        }
        if let Some(status) = &self.status {
            out.push_str(&format!("status: {}\n", status));
        }
        out.push_str("---\n");
        out.push_str(&session.text());
        out
    }

    /// Session snapshot as pretty JSON
    pub fn render_json(&self) -> Result<String, ConsoleError> {
        Ok(serde_json::to_string_pretty(&self.session.snapshot())?)
    }

    pub fn session(&self) -> &DocumentSession {
        &self.session
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
