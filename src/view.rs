//! Display-ready derivations of orchestrator state.
//!
//! Nothing here holds state of its own: every type is computed from a
//! committed [`SummaryResult`], a [`DocumentRecord`] or the active text, and
//! can be rebuilt at any time.

use crate::input::DocumentRecord;
use crate::orchestrator::SummaryResult;
use serde::Serialize;

/// Number of characters shown in a text preview.
pub const PREVIEW_CHARS: usize = 500;

/// Statistics panel for a committed summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub summary_text: String,
    /// Original word count, thousands-separated.
    pub original_words: String,
    /// Summary word count, thousands-separated.
    pub summary_words: String,
    /// Compression ratio as reported by the service, with a `%` suffix.
    pub compression: String,
}

impl ResultView {
    pub fn from_result(result: &SummaryResult) -> Self {
        Self {
            summary_text: result.summary_text.clone(),
            original_words: group_thousands(result.original_word_count),
            summary_words: group_thousands(result.summary_word_count),
            compression: format_percent(result.compression_ratio_percent),
        }
    }
}

/// Clipped preview of the active input text plus its word count.
///
/// Both input modes follow one rule: the excerpt is the first
/// [`PREVIEW_CHARS`] characters, and `...` is appended only when the text is
/// longer than that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPreview {
    pub excerpt: String,
    pub truncated: bool,
    pub word_count: usize,
}

impl TextPreview {
    pub fn new(text: &str) -> Self {
        let mut chars = text.chars();
        let excerpt: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        let truncated = chars.next().is_some();
        Self {
            excerpt,
            truncated,
            word_count: word_count(text),
        }
    }

    /// The excerpt as it should be rendered.
    pub fn display(&self) -> String {
        if self.truncated {
            format!("{}...", self.excerpt)
        } else {
            self.excerpt.clone()
        }
    }

    pub fn word_count_display(&self) -> String {
        group_thousands(self.word_count as u64)
    }
}

/// Page and word counts of an ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub pages: String,
    pub words: String,
}

impl DocumentInfo {
    pub fn from_record(record: &DocumentRecord) -> Self {
        Self {
            pages: record.page_count.to_string(),
            words: group_thousands(record.word_count),
        }
    }
}

/// Count of non-empty tokens separated by runs of whitespace.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `30.0` → `"30%"`, `72.35` → `"72.35%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}
