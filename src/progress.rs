//! Observer trait for orchestrator transitions.
//!
//! Inject an [`Arc<dyn OrchestratorEvents>`] via
//! [`crate::orchestrator::Orchestrator::with_events`] to be told when an
//! operation starts, finishes, fails or is discarded. Front ends use this to
//! drive spinners and status lines without polling the state machine.
//!
//! # Example
//!
//! ```rust
//! use paper_summarizer::{Orchestrator, OrchestratorEvents, ClientConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct ErrorCounter(AtomicUsize);
//!
//! impl OrchestratorEvents for ErrorCounter {
//!     fn on_error(&self, message: &str) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("error: {message}");
//!     }
//! }
//!
//! let counter = Arc::new(ErrorCounter(AtomicUsize::new(0)));
//! let mut orch = Orchestrator::new(&ClientConfig::default())
//!     .with_events(counter.clone() as Arc<dyn OrchestratorEvents>);
//! orch.set_mode(paper_summarizer::InputMode::Paste);
//! orch.set_pasted_text("too short");
//! assert!(orch.begin_summarize().is_err());
//! assert_eq!(counter.0.load(Ordering::SeqCst), 1);
//! ```

use crate::input::DocumentRecord;
use crate::orchestrator::{RequestToken, SummaryResult};
use crate::service::SummarizeRequest;
use std::sync::Arc;

/// Called by the orchestrator on every transition.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Implementations must be `Send + Sync` so an
/// orchestrator can be moved into a spawned task.
pub trait OrchestratorEvents: Send + Sync {
    /// An upload was accepted and ingestion is about to be requested.
    fn on_ingest_start(&self, file_name: &str, size_bytes: u64) {
        let _ = (file_name, size_bytes);
    }

    /// Ingestion succeeded and the document was committed.
    fn on_ingest_complete(&self, document: &DocumentRecord) {
        let _ = document;
    }

    /// A summarization request is about to be issued.
    fn on_summarize_start(&self, request: &SummarizeRequest) {
        let _ = request;
    }

    /// Summarization succeeded and the result was committed.
    fn on_summarize_complete(&self, result: &SummaryResult) {
        let _ = result;
    }

    /// The error slot was set.
    fn on_error(&self, message: &str) {
        let _ = message;
    }

    /// A response arrived for a request that is no longer current.
    fn on_discarded(&self, token: RequestToken) {
        let _ = token;
    }

    /// All input and output was cleared.
    fn on_cleared(&self) {}
}

/// A no-op implementation. The default when no observer is configured.
pub struct NoopEvents;

impl OrchestratorEvents for NoopEvents {}

/// Convenience alias for the type stored in the orchestrator.
pub type EventsHandle = Arc<dyn OrchestratorEvents>;
