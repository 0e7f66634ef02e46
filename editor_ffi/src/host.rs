//! Session owner behind the C boundary
//!
//! The host holds at most one document session. Every call that needs a
//! document fails with `InvalidState` until `init` or `load_text` created one.

use editor_core::{DocumentSession, EditorConfig, EditorError, EditorResult, Motion};
use tracing::{debug, info};

/// Owner of the embedded document session
#[derive(Debug, Default)]
pub struct EditorHost {
    config: EditorConfig,
    session: Option<DocumentSession>,
}

impl EditorHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose sessions are created with `config`
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Starts a fresh, empty session, dropping any previous one
    pub fn init(&mut self) {
        self.session = Some(DocumentSession::with_config(self.config.clone()));
        info!("editor session initialized");
    }

    /// Replaces the document, creating the session if needed
    pub fn load_text(&mut self, text: &[u8]) {
        self.session
            .get_or_insert_with(|| DocumentSession::with_config(self.config.clone()))
            .load_bytes(text);
    }

    /// Drops the session; later calls fail until the next `init`
    pub fn destroy(&mut self) {
        if self.session.take().is_some() {
            info!("editor session destroyed");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> EditorResult<&DocumentSession> {
        self.session.as_ref().ok_or_else(not_initialized)
    }

    pub fn session_mut(&mut self) -> EditorResult<&mut DocumentSession> {
        self.session.as_mut().ok_or_else(not_initialized)
    }

    /// Runs `op` against the live session, logging failures
    pub fn with_session<T>(
        &mut self,
        name: &str,
        op: impl FnOnce(&mut DocumentSession) -> EditorResult<T>,
    ) -> EditorResult<T> {
        let result = self.session_mut().and_then(op);
        if let Err(err) = &result {
            debug!(op = name, %err, "boundary call failed");
        }
        result
    }

    /// Applies `motion`; without a session this does nothing
    pub fn apply_motion(&mut self, motion: Motion) {
        if let Some(session) = self.session.as_mut() {
            session.apply_motion(motion);
        }
    }
}

fn not_initialized() -> EditorError {
    EditorError::InvalidState("editor session not initialized".into())
}
