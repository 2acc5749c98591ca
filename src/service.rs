//! The remote summarization service, seen from the client.
//!
//! The orchestrator only knows the [`SummaryService`] trait: two opaque async
//! operations that either produce a payload or an [`OperationError`].
//! [`HttpSummaryService`] is the production implementation over `reqwest`;
//! tests substitute their own.
//!
//! ## Wire contract
//!
//! | Endpoint | Request | Success body |
//! |----------|---------|--------------|
//! | `POST /upload_pdf` | multipart, one file field `file` | `{ text, word_count, page_count }` |
//! | `POST /summarize`  | JSON `{ text, max_length, min_length }` | `{ summary, original_length, summary_length, compression_ratio }` |
//! | `GET /health`      | (none) | `{ status, model_loaded, device }` |
//!
//! Any non-2xx response may carry `{ "detail": "<message>" }`; a missing,
//! non-string, or unparsable detail falls back to the generic message.

use crate::config::ClientConfig;
use crate::error::{Operation, OperationError, SummarizerError};
use crate::input::DocumentRecord;
use crate::validation::CandidateFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Successful ingestion payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub text: String,
    pub word_count: u64,
    pub page_count: u32,
}

impl From<IngestResponse> for DocumentRecord {
    fn from(r: IngestResponse) -> Self {
        DocumentRecord {
            raw_text: r.text,
            page_count: r.page_count,
            word_count: r.word_count,
        }
    }
}

/// Summarization request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub max_length: u32,
    pub min_length: u32,
}

/// Successful summarization payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub original_length: u64,
    pub summary_length: u64,
    pub compression_ratio: f64,
}

/// Service health as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub device: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}

/// The two operations the orchestrator drives, plus a health probe.
#[async_trait]
pub trait SummaryService: Send + Sync {
    /// Upload a document and get its extracted text back.
    async fn ingest(&self, file: &CandidateFile) -> Result<IngestResponse, OperationError>;

    /// Summarize a body of text.
    async fn summarize(&self, request: &SummarizeRequest)
        -> Result<SummarizeResponse, OperationError>;

    /// Probe whether the service is up and its model loaded.
    async fn health(&self) -> Result<HealthStatus, OperationError>;
}

/// `reqwest`-backed [`SummaryService`].
#[derive(Debug, Clone)]
pub struct HttpSummaryService {
    client: Client,
    config: ClientConfig,
}

impl HttpSummaryService {
    pub fn new(config: ClientConfig) -> Result<Self, SummarizerError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        let client = builder.build().map_err(SummarizerError::HttpClient)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl SummaryService for HttpSummaryService {
    async fn ingest(&self, file: &CandidateFile) -> Result<IngestResponse, OperationError> {
        let op = Operation::Ingest;
        let url = self.config.endpoint("upload_pdf");
        info!("Uploading '{}' ({} bytes) to {}", file.name(), file.size_bytes(), url);

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|e| transport(op, e))?;
        let form = Form::new().part("file", part);

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport(op, e))?;
        let body: IngestResponse = read_json(op, response).await?;
        debug!(
            "Ingested {} pages / {} words in {}ms",
            body.page_count,
            body.word_count,
            start.elapsed().as_millis()
        );
        Ok(body)
    }

    async fn summarize(
        &self,
        request: &SummarizeRequest,
    ) -> Result<SummarizeResponse, OperationError> {
        let op = Operation::Summarize;
        let url = self.config.endpoint("summarize");
        info!(
            "Requesting summary of {} chars (max_length={}, min_length={})",
            request.text.len(),
            request.max_length,
            request.min_length
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport(op, e))?;
        let body: SummarizeResponse = read_json(op, response).await?;
        debug!(
            "Summary: {} → {} words in {}ms",
            body.original_length,
            body.summary_length,
            start.elapsed().as_millis()
        );
        Ok(body)
    }

    async fn health(&self) -> Result<HealthStatus, OperationError> {
        // Health failures reuse the summarize fallback; the probe exists to
        // answer "can I summarize right now?".
        let op = Operation::Summarize;
        let response = self
            .client
            .get(self.config.endpoint("health"))
            .send()
            .await
            .map_err(|e| transport(op, e))?;
        read_json(op, response).await
    }
}

// ── Response handling ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: serde_json::Value,
}

/// Decode a 2xx body as `T`, or map a non-2xx into a service error.
async fn read_json<T: DeserializeOwned>(
    op: Operation,
    response: Response,
) -> Result<T, OperationError> {
    let status = response.status();
    if !status.is_success() {
        let bytes = response.bytes().await.unwrap_or_default();
        let detail = extract_detail(&bytes);
        warn!(
            "{} returned HTTP {}: {}",
            op,
            status.as_u16(),
            detail.as_deref().unwrap_or("<no detail>")
        );
        return Err(OperationError::Service {
            operation: op,
            status: status.as_u16(),
            detail,
        });
    }

    let bytes = response.bytes().await.map_err(|e| transport(op, e))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!("{} returned a malformed body: {}", op, e);
        OperationError::Transport {
            operation: op,
            reason: format!("malformed response body: {e}"),
        }
    })
}

/// Pull a string `detail` out of an error body, if there is one.
pub(crate) fn extract_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn transport(op: Operation, e: impl std::fmt::Display) -> OperationError {
    warn!("{} transport failure: {}", op, e);
    OperationError::Transport {
        operation: op,
        reason: e.to_string(),
    }
}
