//! Editing-session state: the document, its file association and the
//! transient status message.
//!
//! Cursor and viewport live in `core-model::View`; this crate stays buffer
//! centric so the text store can be inspected and saved without touching
//! presentation state.
//!
//! Status messages are fire-and-forget. A message is stored with its creation
//! time and the configured time-to-live; the draw pass asks for the message
//! that is still visible at a given instant, and the main loop expires stale
//! ones on idle ticks.

use core_config::Config;
use core_text::Document;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Ephemeral status message container.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub created_at: Instant,
    pub expires_at: Instant,
}

/// Top-level editor state container (single document).
#[derive(Debug)]
pub struct EditorState {
    pub document: Document,
    /// Path association; absent until the first save when opened without one.
    pub file_name: Option<PathBuf>,
    pub ephemeral_status: Option<EphemeralMessage>,
    /// Line-number gutter toggle.
    pub line_numbers: bool,
    status_ttl: Duration,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, &Config::default())
    }

    pub fn with_config(document: Document, config: &Config) -> Self {
        Self {
            document,
            file_name: None,
            ephemeral_status: None,
            line_numbers: config.line_numbers,
            status_ttl: config.status_ttl,
        }
    }

    pub fn dirty(&self) -> bool {
        self.document.is_dirty()
    }

    /// Display name of the associated file.
    pub fn display_name(&self) -> String {
        self.file_name
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string())
    }

    /// Report a status message using the configured time-to-live.
    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        let ttl = self.status_ttl;
        self.set_ephemeral(msg, ttl);
    }

    /// Set an ephemeral status message with an explicit timeout duration.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        let now = Instant::now();
        let text = msg.into();
        tracing::debug!(
            target: "state.status",
            len = text.len(),
            ttl_ms = ttl.as_millis() as u64,
            "status_set"
        );
        self.ephemeral_status = Some(EphemeralMessage {
            text,
            created_at: now,
            expires_at: now + ttl,
        });
    }

    /// Message still visible at `now`, if any.
    pub fn visible_status(&self, now: Instant) -> Option<&str> {
        self.ephemeral_status
            .as_ref()
            .filter(|m| now < m.expires_at)
            .map(|m| m.text.as_str())
    }

    /// Tick ephemeral status; returns true if message expired and was cleared.
    pub fn tick_ephemeral(&mut self) -> bool {
        self.tick_ephemeral_at(Instant::now())
    }

    pub fn tick_ephemeral_at(&mut self, now: Instant) -> bool {
        if let Some(m) = &self.ephemeral_status
            && now >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }
}
