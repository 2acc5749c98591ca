//! Validation policy: pure gates run before any request is issued.
//!
//! Both predicates are side-effect free. A file that fails
//! [`is_acceptable_file`] is rejected synchronously and never reaches the
//! network; text that fails [`is_summarizable`] blocks the summarize action.
//! The text gate is evaluated at request time against whatever text is active
//! at that moment, never cached from an earlier ingestion.

use crate::error::{SummarizerError, ValidationError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The only accepted upload media type.
pub const PDF_MIME: &str = "application/pdf";

/// Upload size limit: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Minimum trimmed length of text sent for summarization, in characters.
pub const MIN_SUMMARIZABLE_CHARS: usize = 100;

/// A file the user picked for upload.
///
/// `mime_type` is what the picker reported, not sniffed content; that
/// matches what a browser exposes and what the service's own filter checks.
/// The size is always the length of the payload that will be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read a file from disk, deriving its MIME type from the extension.
    ///
    /// Unknown extensions map to `application/octet-stream`, which the
    /// validation gate then rejects.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SummarizerError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| SummarizerError::FileRead {
                path: PathBuf::from(path),
                source,
            })?;
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Loaded candidate file {} ({}, {} bytes)", name, mime, bytes.len());
        Ok(Self::new(name, mime, bytes))
    }
}

/// Accept a file only if it is a PDF no larger than [`MAX_UPLOAD_BYTES`].
///
/// The type check runs first, so a large non-PDF reports `UnsupportedType`.
pub fn is_acceptable_file(file: &CandidateFile) -> Result<(), ValidationError> {
    if file.mime_type != PDF_MIME {
        return Err(ValidationError::UnsupportedType {
            mime: file.mime_type.clone(),
        });
    }
    let size = file.size_bytes();
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Accept text whose trimmed length is at least [`MIN_SUMMARIZABLE_CHARS`].
///
/// A byte-order mark counts as whitespace here, so text read from a file
/// saved with a BOM is measured the same as the pasted equivalent.
pub fn is_summarizable(text: &str) -> Result<(), ValidationError> {
    let chars = text
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .chars()
        .count();
    if chars < MIN_SUMMARIZABLE_CHARS {
        return Err(ValidationError::TooShort {
            chars,
            min: MIN_SUMMARIZABLE_CHARS,
        });
    }
    Ok(())
}
