//! Editor state: the document, cursor, viewport origin, dirty flag, file name, quit guard
//! counter and the ephemeral message line.
//!
//! A single `EditorState` value is owned by the session loop for the whole process lifetime.
//! Text mutations go through the edit helpers below so the dirty flag tracks every applied
//! change; motions mutate `cursor` directly and never touch `dirty`.

use core_text::{Document, EditOutcome, Position};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Ephemeral status message shown on the message line until it expires.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: Instant,
}

/// Top-level editor state container.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub document: Document,
    pub cursor: Position,
    /// Index of the first document line shown on screen.
    pub row_offset: usize,
    /// Text rows available on the last frame (screen rows minus status and message bars).
    pub last_text_height: usize,
    pub file_name: Option<PathBuf>,
    /// True iff the document changed since the last successful load or save.
    pub dirty: bool,
    pub quit_confirmations_remaining: u8,
    pub ephemeral_status: Option<EphemeralMessage>,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            cursor: Position::origin(),
            row_offset: 0,
            last_text_height: 0,
            file_name: None,
            dirty: false,
            quit_confirmations_remaining: 0,
            ephemeral_status: None,
        }
    }

    /// Swap in a freshly loaded document; cursor and viewport return to the origin and the
    /// state is clean.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.cursor = Position::origin();
        self.row_offset = 0;
        self.dirty = false;
    }

    /// Set an ephemeral status message with a fixed timeout duration.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            expires_at: Instant::now() + ttl,
        });
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

    /// Message text if one is set and still fresh at `now`.
    pub fn ephemeral_text(&self, now: Instant) -> Option<&str> {
        self.ephemeral_status
            .as_ref()
            .filter(|m| now < m.expires_at)
            .map(|m| m.text.as_str())
    }

    /// Base file name for display, or `None` for an unnamed buffer.
    pub fn display_name(&self) -> Option<String> {
        let path = self.file_name.as_ref()?;
        Some(
            path.file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
        )
    }

    /// Pull the cursor back inside the document.
    pub fn clamp_cursor(&mut self) {
        self.document.clamp(&mut self.cursor);
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn insert_char(&mut self, ch: u8) -> EditOutcome {
        let outcome = self.document.insert_char(&mut self.cursor, ch);
        self.note_edit(outcome)
    }

    pub fn delete_before(&mut self) -> EditOutcome {
        let outcome = self.document.delete_before(&mut self.cursor);
        self.note_edit(outcome)
    }

    pub fn delete_at(&mut self) -> EditOutcome {
        let outcome = self.document.delete_at(&mut self.cursor);
        self.note_edit(outcome)
    }

    pub fn split_line(&mut self) -> EditOutcome {
        let outcome = self.document.split_line(&mut self.cursor);
        self.note_edit(outcome)
    }

    fn note_edit(&mut self, outcome: EditOutcome) -> EditOutcome {
        if outcome.is_applied() && !self.dirty {
            tracing::trace!(target: "state", "dirty");
            self.dirty = true;
        }
        outcome
    }
}
