//! Error types for the paper-summarizer client.
//!
//! Two layers of errors reflect two distinct audiences:
//!
//! * [`OperationError`]: **User-facing**. The reason an ingestion or
//!   summarization attempt ended without a result. Its [`OperationError::message`]
//!   is exactly what lands in the orchestrator's error slot and what a front
//!   end shows to the user. It splits into three kinds:
//!   - [`ValidationError`]: detected locally and synchronously, never reaches the network
//!   - `Service`: the remote call returned a non-2xx status
//!   - `Transport`: network fault or malformed response body
//!
//! * [`SummarizerError`]: **Programmatic**. Misuse of the library or an
//!   environment problem (bad configuration, a second operation started while
//!   one is in flight, unreadable file). These are returned as `Err` to the
//!   caller. Only `Rejected` has a counterpart in the error slot, because a
//!   validation failure is both a refused call and a message for the user.

use crate::orchestrator::OperationStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Fallback shown when an ingestion failure carries no usable `detail`.
pub const INGEST_FALLBACK_MESSAGE: &str = "Failed to upload PDF";

/// Fallback shown when a summarization failure carries no usable `detail`.
pub const SUMMARIZE_FALLBACK_MESSAGE: &str = "Failed to generate summary";

/// Fatal / programmatic errors returned by the library.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A new operation was requested while another one is still in flight.
    #[error("Another operation is already in progress ({status})")]
    Busy { status: OperationStatus },

    /// The input failed a validation gate. The orchestrator has already
    /// placed the message in its error slot.
    #[error("Input rejected: {0}")]
    Rejected(#[source] ValidationError),

    /// A candidate file could not be read from disk.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// A locally detected input problem. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The file's MIME type is not `application/pdf`.
    #[error("Please upload a PDF file")]
    UnsupportedType { mime: String },

    /// The file exceeds the upload size limit.
    #[error("File size must be less than 10MB")]
    TooLarge { size: u64, limit: u64 },

    /// The text to summarize is shorter than the minimum once trimmed.
    #[error("Please provide at least {min} characters of text to summarize.")]
    TooShort { chars: usize, min: usize },
}

/// Which remote operation an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ingest,
    Summarize,
}

impl Operation {
    /// The generic message used when the service gave no usable detail.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Ingest => INGEST_FALLBACK_MESSAGE,
            Operation::Summarize => SUMMARIZE_FALLBACK_MESSAGE,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Ingest => f.write_str("ingest"),
            Operation::Summarize => f.write_str("summarize"),
        }
    }
}

/// Why an operation attempt ended without a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    /// Rejected locally; no request was issued.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service answered with a non-2xx status.
    ///
    /// `detail` is the response's `detail` string when the body carried one.
    #[error("{operation} failed with HTTP {status}: {}", detail.as_deref().unwrap_or("<no detail>"))]
    Service {
        operation: Operation,
        status: u16,
        detail: Option<String>,
    },

    /// The request never produced a usable response (connect failure,
    /// timeout, malformed JSON).
    #[error("{operation} transport error: {reason}")]
    Transport { operation: Operation, reason: String },
}

impl OperationError {
    /// The text to place in the error slot.
    ///
    /// Service and transport failures are indistinguishable to the user:
    /// both show the server's `detail` when present, else the fallback.
    pub fn message(&self) -> String {
        match self {
            OperationError::Validation(v) => v.to_string(),
            OperationError::Service {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            OperationError::Service { operation, .. } => operation.fallback_message().to_string(),
            OperationError::Transport { operation, .. } => operation.fallback_message().to_string(),
        }
    }
}

/// The single user-visible error slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub message: String,
}

impl ErrorState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&OperationError> for ErrorState {
    fn from(e: &OperationError) -> Self {
        ErrorState::new(e.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_message_matches_ui_copy() {
        let e = ValidationError::TooShort { chars: 50, min: 100 };
        assert_eq!(
            e.to_string(),
            "Please provide at least 100 characters of text to summarize."
        );
    }

    #[test]
    fn service_error_uses_detail() {
        let e = OperationError::Service {
            operation: Operation::Summarize,
            status: 500,
            detail: Some("model unavailable".into()),
        };
        assert_eq!(e.message(), "model unavailable");
        assert!(e.to_string().contains("500"));
    }

    #[test]
    fn service_error_without_detail_falls_back() {
        let e = OperationError::Service {
            operation: Operation::Ingest,
            status: 502,
            detail: None,
        };
        assert_eq!(e.message(), INGEST_FALLBACK_MESSAGE);

        let empty = OperationError::Service {
            operation: Operation::Summarize,
            status: 400,
            detail: Some(String::new()),
        };
        assert_eq!(empty.message(), SUMMARIZE_FALLBACK_MESSAGE);
    }

    #[test]
    fn transport_error_hides_reason_from_user() {
        let e = OperationError::Transport {
            operation: Operation::Summarize,
            reason: "connection refused".into(),
        };
        assert_eq!(e.message(), SUMMARIZE_FALLBACK_MESSAGE);
        assert!(e.to_string().contains("connection refused"));
    }

    #[test]
    fn validation_error_message_is_the_ui_copy() {
        let e = OperationError::from(ValidationError::TooLarge {
            size: 11 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        });
        assert_eq!(e.message(), "File size must be less than 10MB");
        assert_eq!(ErrorState::from(&e).message, e.message());
    }

    #[test]
    fn busy_display_names_status() {
        let e = SummarizerError::Busy {
            status: OperationStatus::Summarizing,
        };
        assert!(e.to_string().contains("summarizing"), "got: {e}");
    }
}
