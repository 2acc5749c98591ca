//! Input buffer: the two candidate text sources and the active-mode selector.
//!
//! The buffer is pure storage. It never validates and never talks to the
//! network; the orchestrator decides what goes in, and
//! [`crate::validation`] decides whether what comes out is usable.
//!
//! Switching mode keeps the other mode's content, so a user can flip
//! between an uploaded paper and pasted notes without losing either.

use serde::{Deserialize, Serialize};

/// Which input source is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Text extracted from an uploaded PDF. (default)
    #[default]
    Upload,
    /// Text typed or pasted by the user.
    Paste,
}

/// Text and counts extracted from an uploaded document by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub raw_text: String,
    pub page_count: u32,
    pub word_count: u64,
}

/// Holds both input sources and the active mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    mode: InputMode,
    document: Option<DocumentRecord>,
    pasted: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Switch the active mode. Buffered content of both modes is untouched.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn pasted_text(&self) -> &str {
        &self.pasted
    }

    /// Replace the pasted text verbatim.
    pub fn set_pasted_text(&mut self, text: impl Into<String>) {
        self.pasted = text.into();
    }

    pub fn document(&self) -> Option<&DocumentRecord> {
        self.document.as_ref()
    }

    pub fn set_document(&mut self, record: Option<DocumentRecord>) {
        self.document = record;
    }

    /// The text of the active mode, or `""` when that source is empty.
    pub fn active_text(&self) -> &str {
        match self.mode {
            InputMode::Upload => self
                .document
                .as_ref()
                .map(|d| d.raw_text.as_str())
                .unwrap_or(""),
            InputMode::Paste => &self.pasted,
        }
    }

    /// True when either source holds any text, regardless of mode.
    pub fn has_any_text(&self) -> bool {
        !self.pasted.is_empty()
            || self
                .document
                .as_ref()
                .is_some_and(|d| !d.raw_text.is_empty())
    }

    /// Drop both sources. The mode is kept.
    pub fn clear(&mut self) {
        self.document = None;
        self.pasted.clear();
    }
}
