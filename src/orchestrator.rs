//! Request orchestration: the client-side state machine.
//!
//! ## States
//!
//! ```text
//!            begin_ingest (file passes gate)
//!   ┌──────┐ ─────────────────────────────▶ ┌───────────┐
//!   │      │ ◀───────────────────────────── │ INGESTING │
//!   │      │   complete_ingest (ok / err)   └───────────┘
//!   │ IDLE │
//!   │      │ begin_summarize (text passes gate)
//!   │      │ ─────────────────────────────▶ ┌─────────────┐
//!   │      │ ◀───────────────────────────── │ SUMMARIZING │
//!   └──────┘  complete_summarize (ok / err) └─────────────┘
//!       ▲
//!       └── clear (from any state)
//! ```
//!
//! Each network round-trip is split into two explicit halves. `begin_*`
//! checks the gates, performs the entry side effects and hands back a ticket
//! carrying a [`RequestToken`]. The caller performs the I/O with the ticket's
//! payload and feeds the outcome to `complete_*`. Between the two halves the
//! machine refuses to start anything else ([`SummarizerError::Busy`]).
//!
//! ## Stale responses
//!
//! Tokens increase monotonically. An outcome is applied only if its token is
//! the one currently in flight; anything else (a response for a request that
//! [`Orchestrator::clear`] abandoned, or a duplicate delivery) is discarded
//! and reported as [`Completion::Discarded`].
//!
//! ## Output slot
//!
//! The summary and the error share one slot: setting either empties the
//! other, so they are never populated together.

use crate::config::{ClientConfig, SummaryLength};
use crate::error::{ErrorState, OperationError, SummarizerError, ValidationError};
use crate::input::{DocumentRecord, InputBuffer, InputMode};
use crate::progress::EventsHandle;
use crate::service::{IngestResponse, SummarizeRequest, SummarizeResponse, SummaryService};
use crate::validation::{is_acceptable_file, is_summarizable, CandidateFile};
use crate::view::{ResultView, TextPreview};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// What the orchestrator is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    #[default]
    Idle,
    Ingesting,
    Summarizing,
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationStatus::Idle => f.write_str("idle"),
            OperationStatus::Ingesting => f.write_str("ingesting"),
            OperationStatus::Summarizing => f.write_str("summarizing"),
        }
    }
}

/// A committed summarization result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary_text: String,
    pub original_word_count: u64,
    pub summary_word_count: u64,
    /// Passed through unmodified from the service.
    pub compression_ratio_percent: f64,
}

impl From<SummarizeResponse> for SummaryResult {
    fn from(r: SummarizeResponse) -> Self {
        Self {
            summary_text: r.summary,
            original_word_count: r.original_length,
            summary_word_count: r.summary_length,
            compression_ratio_percent: r.compression_ratio,
        }
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Proof that an ingestion was started; carries what to upload.
#[derive(Debug, Clone)]
pub struct IngestTicket {
    pub token: RequestToken,
    pub file: CandidateFile,
}

/// Proof that a summarization was started; carries the request body.
#[derive(Debug, Clone)]
pub struct SummarizeTicket {
    pub token: RequestToken,
    pub request: SummarizeRequest,
}

/// What happened to an outcome handed to `complete_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome was committed to state.
    Applied,
    /// The outcome belonged to a request that is no longer current.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    status: OperationStatus,
    token: RequestToken,
}

/// Owns every piece of client state and exposes transitions as the only
/// way to change it.
pub struct Orchestrator {
    input: InputBuffer,
    in_flight: Option<InFlight>,
    summary: Option<SummaryResult>,
    error: Option<ErrorState>,
    summary_length: SummaryLength,
    last_token: u64,
    events: Option<EventsHandle>,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("input", &self.input)
            .field("in_flight", &self.in_flight)
            .field("summary", &self.summary)
            .field("error", &self.error)
            .field("summary_length", &self.summary_length)
            .field("last_token", &self.last_token)
            .field("events", &self.events.as_ref().map(|_| "<dyn OrchestratorEvents>"))
            .finish()
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Orchestrator {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            input: InputBuffer::new(),
            in_flight: None,
            summary: None,
            error: None,
            summary_length: config.summary_length,
            last_token: 0,
            events: None,
        }
    }

    /// Attach an observer for transition events.
    pub fn with_events(mut self, events: EventsHandle) -> Self {
        self.events = Some(events);
        self
    }

    // ── Read access ──────────────────────────────────────────────────────

    pub fn status(&self) -> OperationStatus {
        self.in_flight.map(|f| f.status).unwrap_or_default()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn mode(&self) -> InputMode {
        self.input.mode()
    }

    pub fn document(&self) -> Option<&DocumentRecord> {
        self.input.document()
    }

    pub fn pasted_text(&self) -> &str {
        self.input.pasted_text()
    }

    pub fn active_text(&self) -> &str {
        self.input.active_text()
    }

    pub fn summary(&self) -> Option<&SummaryResult> {
        self.summary.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    pub fn summary_length(&self) -> SummaryLength {
        self.summary_length
    }

    /// Whether a "Generate Summary" action should be offered: nothing is in
    /// flight and at least one source holds text.
    pub fn can_summarize(&self) -> bool {
        self.is_idle() && self.input.has_any_text()
    }

    /// Display statistics for the committed summary, if any.
    pub fn result_view(&self) -> Option<ResultView> {
        self.summary.as_ref().map(ResultView::from_result)
    }

    /// Preview of the active text, shown once either source holds text.
    pub fn text_preview(&self) -> Option<TextPreview> {
        self.input
            .has_any_text()
            .then(|| TextPreview::new(self.input.active_text()))
    }

    // ── Plain mutations (no transition) ──────────────────────────────────

    pub fn set_mode(&mut self, mode: InputMode) {
        debug!("Input mode → {:?}", mode);
        self.input.set_mode(mode);
    }

    pub fn set_pasted_text(&mut self, text: impl Into<String>) {
        self.input.set_pasted_text(text);
    }

    /// Change the preference used by the next summarization request.
    pub fn set_summary_length(&mut self, length: SummaryLength) {
        self.summary_length = length;
    }

    /// Empty the error slot. Nothing else changes.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Discard both sources, the summary and the error, from any state.
    ///
    /// An in-flight request is abandoned rather than aborted: the machine
    /// returns to idle at once and the request's eventual outcome is
    /// discarded. Mode and summary length are preferences and survive.
    pub fn clear(&mut self) {
        if let Some(f) = self.in_flight.take() {
            info!("Clear abandons in-flight {} request {}", f.status, f.token);
        }
        self.input.clear();
        self.summary = None;
        self.error = None;
        if let Some(ref ev) = self.events {
            ev.on_cleared();
        }
    }

    // ── Ingestion ────────────────────────────────────────────────────────

    /// IDLE → INGESTING.
    ///
    /// Rejects with `Busy` (no state change) while another operation is in
    /// flight, and with `Rejected` (error slot set) when the file fails the
    /// upload gate. On entry the error, the summary and any previous
    /// document are cleared.
    pub fn begin_ingest(&mut self, file: CandidateFile) -> Result<IngestTicket, SummarizerError> {
        self.ensure_idle()?;
        if let Err(v) = is_acceptable_file(&file) {
            return Err(self.reject(v));
        }

        self.error = None;
        self.summary = None;
        self.input.set_document(None);
        let token = self.issue(OperationStatus::Ingesting);
        info!(
            "Ingestion {} started: '{}' ({} bytes)",
            token,
            file.name(),
            file.size_bytes()
        );
        if let Some(ref ev) = self.events {
            ev.on_ingest_start(file.name(), file.size_bytes());
        }
        Ok(IngestTicket { token, file })
    }

    /// INGESTING → IDLE, committing the document or the error.
    pub fn complete_ingest(
        &mut self,
        token: RequestToken,
        outcome: Result<IngestResponse, OperationError>,
    ) -> Completion {
        if !self.settle(OperationStatus::Ingesting, token) {
            return Completion::Discarded;
        }
        match outcome {
            Ok(response) => {
                let record = DocumentRecord::from(response);
                info!(
                    "Ingestion {} complete: {} pages, {} words",
                    token, record.page_count, record.word_count
                );
                self.error = None;
                self.input.set_document(Some(record));
                if let (Some(ev), Some(doc)) = (&self.events, self.input.document()) {
                    ev.on_ingest_complete(doc);
                }
            }
            Err(e) => {
                warn!("Ingestion {} failed: {}", token, e);
                self.input.set_document(None);
                self.fail(&e);
            }
        }
        Completion::Applied
    }

    // ── Summarization ────────────────────────────────────────────────────

    /// IDLE → SUMMARIZING.
    ///
    /// The text gate runs now, against whichever source is active now. The
    /// length parameters are derived from the current preference.
    pub fn begin_summarize(&mut self) -> Result<SummarizeTicket, SummarizerError> {
        self.ensure_idle()?;
        let text = self.input.active_text().to_string();
        if let Err(v) = is_summarizable(&text) {
            return Err(self.reject(v));
        }

        let request = SummarizeRequest {
            text,
            max_length: self.summary_length.get(),
            min_length: self.summary_length.min_length(),
        };
        self.error = None;
        self.summary = None;
        let token = self.issue(OperationStatus::Summarizing);
        info!(
            "Summarization {} started ({:?} mode, max_length={}, min_length={})",
            token,
            self.input.mode(),
            request.max_length,
            request.min_length
        );
        if let Some(ref ev) = self.events {
            ev.on_summarize_start(&request);
        }
        Ok(SummarizeTicket { token, request })
    }

    /// SUMMARIZING → IDLE, committing the summary or the error.
    pub fn complete_summarize(
        &mut self,
        token: RequestToken,
        outcome: Result<SummarizeResponse, OperationError>,
    ) -> Completion {
        if !self.settle(OperationStatus::Summarizing, token) {
            return Completion::Discarded;
        }
        match outcome {
            Ok(response) => {
                let result = SummaryResult::from(response);
                info!(
                    "Summarization {} complete: {} → {} words",
                    token, result.original_word_count, result.summary_word_count
                );
                self.error = None;
                if let Some(ref ev) = self.events {
                    ev.on_summarize_complete(&result);
                }
                self.summary = Some(result);
            }
            Err(e) => {
                warn!("Summarization {} failed: {}", token, e);
                self.fail(&e);
            }
        }
        Completion::Applied
    }

    // ── Drivers ──────────────────────────────────────────────────────────

    /// Run a whole ingestion round-trip against `service`.
    ///
    /// Service failures are not returned as `Err`: they land in the error
    /// slot, as they would for an interactive user.
    pub async fn ingest(
        &mut self,
        service: &dyn SummaryService,
        file: CandidateFile,
    ) -> Result<Completion, SummarizerError> {
        let ticket = self.begin_ingest(file)?;
        let outcome = service.ingest(&ticket.file).await;
        Ok(self.complete_ingest(ticket.token, outcome))
    }

    /// Run a whole summarization round-trip against `service`.
    pub async fn summarize(
        &mut self,
        service: &dyn SummaryService,
    ) -> Result<Completion, SummarizerError> {
        let ticket = self.begin_summarize()?;
        let outcome = service.summarize(&ticket.request).await;
        Ok(self.complete_summarize(ticket.token, outcome))
    }

    // ── Internal helpers ─────────────────────────────────────────────────

    fn ensure_idle(&self) -> Result<(), SummarizerError> {
        match self.in_flight {
            None => Ok(()),
            Some(f) => {
                debug!("Refusing new operation while {} ({})", f.status, f.token);
                Err(SummarizerError::Busy { status: f.status })
            }
        }
    }

    fn issue(&mut self, status: OperationStatus) -> RequestToken {
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.in_flight = Some(InFlight { status, token });
        token
    }

    /// Return to idle if `token` is the request in flight for `status`.
    fn settle(&mut self, status: OperationStatus, token: RequestToken) -> bool {
        if self.in_flight == Some(InFlight { status, token }) {
            self.in_flight = None;
            return true;
        }
        warn!("Discarding stale {} response {}", status, token);
        if let Some(ref ev) = self.events {
            ev.on_discarded(token);
        }
        false
    }

    fn reject(&mut self, v: ValidationError) -> SummarizerError {
        debug!("Validation rejected input: {:?}", v);
        self.fail(&OperationError::from(v.clone()));
        SummarizerError::Rejected(v)
    }

    fn fail(&mut self, e: &OperationError) {
        self.set_error(ErrorState::from(e));
    }

    fn set_error(&mut self, error: ErrorState) {
        self.summary = None;
        if let Some(ref ev) = self.events {
            ev.on_error(&error.message);
        }
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Operation;
    use crate::service::HealthStatus;
    use crate::validation::{MAX_UPLOAD_BYTES, PDF_MIME};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn pdf(size: usize) -> CandidateFile {
        CandidateFile::new("paper.pdf", PDF_MIME, vec![0u8; size])
    }

    fn long_text() -> String {
        "word ".repeat(40)
    }

    fn ingest_ok() -> IngestResponse {
        IngestResponse {
            text: long_text(),
            word_count: 40,
            page_count: 2,
        }
    }

    fn summary_ok() -> SummarizeResponse {
        SummarizeResponse {
            summary: "short".into(),
            original_length: 40,
            summary_length: 1,
            compression_ratio: 2.5,
        }
    }

    fn service_err(op: Operation, detail: &str) -> OperationError {
        OperationError::Service {
            operation: op,
            status: 500,
            detail: Some(detail.into()),
        }
    }

    fn assert_slot_invariant(o: &Orchestrator) {
        assert!(
            !(o.summary().is_some() && o.error().is_some()),
            "summary and error populated together: {o:?}"
        );
    }

    #[test]
    fn starts_idle_and_empty() {
        let o = Orchestrator::default();
        assert_eq!(o.status(), OperationStatus::Idle);
        assert_eq!(o.mode(), InputMode::Upload);
        assert!(o.summary().is_none());
        assert!(o.error().is_none());
        assert!(!o.can_summarize());
        assert_eq!(o.summary_length().get(), 200);
    }

    #[test]
    fn ingest_success_commits_document() {
        let mut o = Orchestrator::default();
        let t = o.begin_ingest(pdf(1024)).unwrap();
        assert_eq!(o.status(), OperationStatus::Ingesting);
        assert!(!o.can_summarize());

        assert_eq!(o.complete_ingest(t.token, Ok(ingest_ok())), Completion::Applied);
        assert_eq!(o.status(), OperationStatus::Idle);
        assert_eq!(o.document().unwrap().page_count, 2);
        assert!(o.error().is_none());
        assert!(o.can_summarize());
    }

    #[test]
    fn ingest_failure_sets_error_and_leaves_no_document() {
        let mut o = Orchestrator::default();
        let t = o.begin_ingest(pdf(10)).unwrap();
        o.complete_ingest(t.token, Err(service_err(Operation::Ingest, "bad pdf")));
        assert_eq!(o.status(), OperationStatus::Idle);
        assert!(o.document().is_none());
        assert_eq!(o.error().unwrap().message, "bad pdf");
    }

    #[test]
    fn new_ingestion_clears_previous_results() {
        let mut o = Orchestrator::default();
        let t = o.begin_ingest(pdf(10)).unwrap();
        o.complete_ingest(t.token, Ok(ingest_ok()));
        let s = o.begin_summarize().unwrap();
        o.complete_summarize(s.token, Ok(summary_ok()));
        assert!(o.summary().is_some());

        let _t2 = o.begin_ingest(pdf(10)).unwrap();
        assert!(o.document().is_none());
        assert!(o.summary().is_none());
        assert!(o.error().is_none());
    }

    #[test]
    fn rejected_file_never_starts_ingestion() {
        let mut o = Orchestrator::default();
        let ticket = o.begin_ingest(pdf(1024)).unwrap();
        o.complete_ingest(ticket.token, Ok(ingest_ok()));
        assert!(o.document().is_some());

        let err = o.begin_ingest(pdf(MAX_UPLOAD_BYTES as usize + 1)).unwrap_err();
        assert!(matches!(
            err,
            SummarizerError::Rejected(ValidationError::TooLarge { .. })
        ));
        assert_eq!(o.status(), OperationStatus::Idle);
        assert_eq!(o.error().unwrap().message, "File size must be less than 10MB");

        let err = o
            .begin_ingest(CandidateFile::new("a.docx", "application/msword", vec![1]))
            .unwrap_err();
        assert!(matches!(
            err,
            SummarizerError::Rejected(ValidationError::UnsupportedType { .. })
        ));
        assert_eq!(o.error().unwrap().message, "Please upload a PDF file");
        assert_eq!(o.document().map(|d| d.page_count), Some(2));
    }

    #[test]
    fn short_text_blocks_summarize_synchronously() {
        let mut o = Orchestrator::default();
        o.set_mode(InputMode::Paste);
        o.set_pasted_text("x".repeat(50));
        let err = o.begin_summarize().unwrap_err();
        assert!(matches!(err, SummarizerError::Rejected(ValidationError::TooShort { .. })));
        assert_eq!(o.status(), OperationStatus::Idle);
        assert_eq!(
            o.error().unwrap().message,
            "Please provide at least 100 characters of text to summarize."
        );
    }

    #[test]
    fn gate_uses_current_text_not_ingestion_time_text() {
        let mut o = Orchestrator::default();
        o.set_mode(InputMode::Paste);
        o.set_pasted_text(long_text());
        let s = o.begin_summarize().unwrap();
        o.complete_summarize(s.token, Ok(summary_ok()));

        o.set_pasted_text("now too short");
        assert!(o.begin_summarize().is_err());
        assert_slot_invariant(&o);
        assert!(o.summary().is_none());
    }

    #[test]
    fn upload_mode_without_document_is_too_short() {
        let mut o = Orchestrator::default();
        o.set_pasted_text(long_text());
        // Pasted text exists but the active mode is Upload.
        assert!(o.can_summarize());
        assert!(matches!(
            o.begin_summarize(),
            Err(SummarizerError::Rejected(ValidationError::TooShort { chars: 0, .. }))
        ));
    }

    #[test]
    fn summarize_request_uses_current_length_preference() {
        let mut o = Orchestrator::default();
        o.set_mode(InputMode::Paste);
        o.set_pasted_text(long_text());
        o.set_summary_length(SummaryLength::new(300));
        let s = o.begin_summarize().unwrap();
        assert_eq!(s.request.max_length, 300);
        assert_eq!(s.request.min_length, 120);
        assert_eq!(s.request.text, long_text());
    }

    #[test]
    fn summarize_success_and_failure() {
        let mut o = Orchestrator::default();
        o.set_mode(InputMode::Paste);
        o.set_pasted_text(long_text());

        let s = o.begin_summarize().unwrap();
        assert_eq!(o.status(), OperationStatus::Summarizing);
        o.complete_summarize(s.token, Ok(summary_ok()));
        assert_eq!(o.summary().unwrap().summary_text, "short");
        assert_slot_invariant(&o);

        let s = o.begin_summarize().unwrap();
        assert!(o.summary().is_none(), "entry clears the previous summary");
        o.complete_summarize(s.token, Err(service_err(Operation::Summarize, "model unavailable")));
        assert_eq!(o.error().unwrap().message, "model unavailable");
        assert!(o.summary().is_none());
        assert_eq!(o.status(), OperationStatus::Idle);
    }

    #[test]
    fn busy_guard_rejects_without_touching_state() {
        let mut o = Orchestrator::default();
        o.set_mode(InputMode::Paste);
        o.set_pasted_text(long_text());
        let s = o.begin_summarize().unwrap();

        let before = format!("{o:?}");
        assert!(matches!(
            o.begin_ingest(pdf(10)),
            Err(SummarizerError::Busy {
                status: OperationStatus::Summarizing
            })
        ));
        assert!(matches!(o.begin_summarize(), Err(SummarizerError::Busy { .. })));
        assert_eq!(format!("{o:?}"), before);

        o.complete_summarize(s.token, Ok(summary_ok()));
        assert!(o.is_idle());
    }

    #[test]
    fn clear_abandons_in_flight_request() {
        let mut o = Orchestrator::default();
        let t = o.begin_ingest(pdf(10)).unwrap();
        o.clear();
        assert!(o.is_idle());

        assert_eq!(o.complete_ingest(t.token, Ok(ingest_ok())), Completion::Discarded);
        assert!(o.document().is_none());
    }

    #[test]
    fn late_response_does_not_overwrite_newer_request() {
        let mut o = Orchestrator::default();
        o.set_mode(InputMode::Paste);
        o.set_pasted_text(long_text());
        let first = o.begin_summarize().unwrap();
        o.clear();
        o.set_pasted_text(long_text());
        let second = o.begin_summarize().unwrap();
        assert!(second.token > first.token);

        assert_eq!(
            o.complete_summarize(first.token, Err(service_err(Operation::Summarize, "old"))),
            Completion::Discarded
        );
        assert!(o.error().is_none());
        assert_eq!(o.status(), OperationStatus::Summarizing);

        assert_eq!(o.complete_summarize(second.token, Ok(summary_ok())), Completion::Applied);
        assert!(o.summary().is_some());
    }

    #[test]
    fn duplicate_or_mismatched_completion_is_discarded() {
        let mut o = Orchestrator::default();
        let t = o.begin_ingest(pdf(10)).unwrap();
        // Right token, wrong kind.
        assert_eq!(o.complete_summarize(t.token, Ok(summary_ok())), Completion::Discarded);
        assert_eq!(o.status(), OperationStatus::Ingesting);

        assert_eq!(o.complete_ingest(t.token, Ok(ingest_ok())), Completion::Applied);
        assert_eq!(o.complete_ingest(t.token, Ok(ingest_ok())), Completion::Discarded);
    }

    #[test]
    fn clear_is_idempotent_and_keeps_preferences() {
        let mut o = Orchestrator::default();
        o.set_mode(InputMode::Paste);
        o.set_pasted_text(long_text());
        o.set_summary_length(SummaryLength::new(350));
        let s = o.begin_summarize().unwrap();
        o.complete_summarize(s.token, Ok(summary_ok()));

        o.clear();
        let once = format!("{o:?}");
        o.clear();
        assert_eq!(format!("{o:?}"), once);

        assert_eq!(o.pasted_text(), "");
        assert!(o.summary().is_none());
        assert!(o.error().is_none());
        assert_eq!(o.mode(), InputMode::Paste);
        assert_eq!(o.summary_length().get(), 350);
    }

    #[test]
    fn dismiss_error_touches_nothing_else() {
        let mut o = Orchestrator::default();
        o.set_mode(InputMode::Paste);
        o.set_pasted_text("short");
        let _ = o.begin_summarize();
        assert!(o.error().is_some());
        o.dismiss_error();
        assert!(o.error().is_none());
        assert_eq!(o.pasted_text(), "short");
    }

    #[test]
    fn mode_switch_preserves_both_sources() {
        let mut o = Orchestrator::default();
        let t = o.begin_ingest(pdf(10)).unwrap();
        o.complete_ingest(t.token, Ok(ingest_ok()));
        o.set_mode(InputMode::Paste);
        o.set_pasted_text("pasted");
        assert_eq!(o.active_text(), "pasted");
        o.set_mode(InputMode::Upload);
        assert_eq!(o.active_text(), long_text());
    }

    // ── Drivers against a scripted service ───────────────────────────────

    struct Scripted {
        ingest: Result<IngestResponse, OperationError>,
        summarize: Result<SummarizeResponse, OperationError>,
        requests: Mutex<Vec<SummarizeRequest>>,
    }

    #[async_trait]
    impl SummaryService for Scripted {
        async fn ingest(&self, _file: &CandidateFile) -> Result<IngestResponse, OperationError> {
            self.ingest.clone()
        }

        async fn summarize(
            &self,
            request: &SummarizeRequest,
        ) -> Result<SummarizeResponse, OperationError> {
            self.requests.lock().unwrap().push(request.clone());
            self.summarize.clone()
        }

        async fn health(&self) -> Result<HealthStatus, OperationError> {
            Ok(HealthStatus {
                status: "healthy".into(),
                model_loaded: true,
                device: None,
            })
        }
    }

    #[test]
    fn drivers_run_full_round_trips() {
        let svc = Scripted {
            ingest: Ok(ingest_ok()),
            summarize: Ok(summary_ok()),
            requests: Mutex::new(Vec::new()),
        };
        let mut o = Orchestrator::default();
        tokio_test::block_on(async {
            assert_eq!(o.ingest(&svc, pdf(100)).await.unwrap(), Completion::Applied);
            assert_eq!(o.summarize(&svc).await.unwrap(), Completion::Applied);
        });
        assert!(o.is_idle());
        assert_eq!(o.result_view().unwrap().compression, "2.5%");
        assert_eq!(svc.requests.lock().unwrap()[0].min_length, 80);
    }

    #[test]
    fn driver_failure_lands_in_error_slot() {
        let svc = Scripted {
            ingest: Err(OperationError::Transport {
                operation: Operation::Ingest,
                reason: "reset".into(),
            }),
            summarize: Ok(summary_ok()),
            requests: Mutex::new(Vec::new()),
        };
        let mut o = Orchestrator::default();
        let c = tokio_test::block_on(o.ingest(&svc, pdf(1))).unwrap();
        assert_eq!(c, Completion::Applied);
        assert_eq!(o.error().unwrap().message, "Failed to upload PDF");
        assert!(svc.requests.lock().unwrap().is_empty());
    }
}
