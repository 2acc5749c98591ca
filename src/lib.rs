//! # paper-summarizer
//!
//! Client for a remote research-paper summarization service: upload a PDF or
//! paste text, ask the service for an abstractive summary, and render the
//! result.
//!
//! The interesting part is the [`Orchestrator`], a small state machine that
//! owns all client state, enforces that at most one request is in flight,
//! validates input before anything touches the network, and discards
//! responses that arrive for requests it has since abandoned.
//!
//! ## Flow
//!
//! ```text
//! user action
//!  │
//!  ├─ 1. Gate      validation: PDF ≤ 10 MiB / text ≥ 100 chars
//!  ├─ 2. Begin     orchestrator: IDLE → INGESTING | SUMMARIZING, issue token
//!  ├─ 3. Request   service: POST /upload_pdf | POST /summarize
//!  ├─ 4. Complete  orchestrator: apply if token current, back to IDLE
//!  └─ 5. Render    view: word counts, compression ratio, preview
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paper_summarizer::{
//!     CandidateFile, ClientConfig, HttpSummaryService, InputMode, Orchestrator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .base_url("http://localhost:8000")
//!         .build()?;
//!     let service = HttpSummaryService::new(config.clone())?;
//!     let mut orch = Orchestrator::new(&config);
//!
//!     orch.set_mode(InputMode::Upload);
//!     orch.ingest(&service, CandidateFile::from_path("paper.pdf").await?).await?;
//!     orch.summarize(&service).await?;
//!
//!     match (orch.result_view(), orch.error()) {
//!         (Some(view), _) => println!("{}\n\n{} → {} words ({})",
//!             view.summary_text, view.original_words, view.summary_words, view.compression),
//!         (None, Some(err)) => eprintln!("error: {}", err.message),
//!         _ => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `summarize` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod input;
pub mod orchestrator;
pub mod progress;
pub mod service;
pub mod validation;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ClientConfig, ClientConfigBuilder, SummaryLength};
pub use error::{ErrorState, Operation, OperationError, SummarizerError, ValidationError};
pub use input::{DocumentRecord, InputBuffer, InputMode};
pub use orchestrator::{
    Completion, IngestTicket, OperationStatus, Orchestrator, RequestToken, SummarizeTicket,
    SummaryResult,
};
pub use progress::{EventsHandle, NoopEvents, OrchestratorEvents};
pub use service::{
    HealthStatus, HttpSummaryService, IngestResponse, SummarizeRequest, SummarizeResponse,
    SummaryService,
};
pub use validation::{is_acceptable_file, is_summarizable, CandidateFile};
pub use view::{DocumentInfo, ResultView, TextPreview};
