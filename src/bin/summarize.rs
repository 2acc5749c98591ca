//! CLI binary for paper-summarizer.
//!
//! A thin shim over the library crate: maps CLI flags to `ClientConfig`,
//! feeds the chosen input through the `Orchestrator` and prints the result.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use paper_summarizer::{
    CandidateFile, ClientConfig, DocumentInfo, DocumentRecord, EventsHandle, HttpSummaryService,
    InputMode, Orchestrator, OrchestratorEvents, RequestToken, ResultView, SummarizeRequest,
    SummaryLength, SummaryResult, SummaryService, TextPreview,
};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── Spinner driven by orchestrator events ────────────────────────────────────

/// Shows a spinner while a request is in flight and a one-line log entry
/// when it settles. A fresh bar is created per operation because a finished
/// indicatif bar cannot be restarted.
struct CliSpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliSpinner {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            bar: Mutex::new(None),
        })
    }

    fn start(&self, prefix: &str, message: String) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix(prefix.to_string());
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn finish(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl OrchestratorEvents for CliSpinner {
    fn on_ingest_start(&self, file_name: &str, size_bytes: u64) {
        self.start(
            "Uploading",
            format!("{file_name} ({:.2} KB)", size_bytes as f64 / 1024.0),
        );
    }

    fn on_ingest_complete(&self, document: &DocumentRecord) {
        self.finish();
        let info = DocumentInfo::from_record(document);
        eprintln!(
            "{} Extracted {} pages, {} words",
            green("✓"),
            bold(&info.pages),
            bold(&info.words)
        );
    }

    fn on_summarize_start(&self, request: &SummarizeRequest) {
        self.start(
            "Summarizing",
            format!(
                "{} words in, {}–{} words out",
                paper_summarizer::view::word_count(&request.text),
                request.min_length,
                request.max_length
            ),
        );
    }

    fn on_summarize_complete(&self, _result: &SummaryResult) {
        self.finish();
    }

    fn on_error(&self, _message: &str) {
        // The caller prints the message once the operation returns.
        self.finish();
    }

    fn on_discarded(&self, token: RequestToken) {
        eprintln!("{} ignored stale response {}", dim("·"), token);
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarize a PDF (service on localhost:8000)
  summarize paper.pdf

  # Shorter summary from a remote service
  summarize --base-url http://gpu-box:8000 --length 100 paper.pdf

  # Summarize pasted text
  summarize --text "$(cat abstract.txt)"
  summarize --text-file intro.txt
  pbpaste | summarize -

  # Only extract text from the PDF, no summary
  summarize --extract-only paper.pdf

  # Machine-readable output
  summarize --json paper.pdf > summary.json

  # Is the service up and the model loaded?
  summarize --health

LIMITS:
  PDF uploads must be application/pdf (by extension) and at most 10 MiB.
  Text must contain at least 100 characters once trimmed.
  Summary length is 100–400 words in steps of 50 (snapped).

ENVIRONMENT VARIABLES:
  SUMMARIZER_BASE_URL     Service base URL
  SUMMARIZER_LENGTH       Target summary length in words
  SUMMARIZER_TIMEOUT      Request timeout in seconds
  RUST_LOG                Override log filter (e.g. paper_summarizer=debug)
"#;

/// Summarize research papers with a remote summarization service.
#[derive(Parser, Debug)]
#[command(
    name = "summarize",
    version,
    about = "Summarize research papers (PDF or text) with a remote summarization service",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to upload, or `-` to read text to summarize from stdin.
    input: Option<String>,

    /// Text to summarize instead of a PDF.
    #[arg(long, conflicts_with_all = ["input", "text_file"])]
    text: Option<String>,

    /// Read text to summarize from this file instead of a PDF.
    #[arg(long, conflicts_with = "input")]
    text_file: Option<PathBuf>,

    /// Base URL of the summarization service.
    #[arg(long, env = "SUMMARIZER_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Target summary length in words (100–400, snapped to steps of 50).
    #[arg(short, long, env = "SUMMARIZER_LENGTH", default_value_t = SummaryLength::DEFAULT,
          value_parser = clap::value_parser!(u32).range(100..=400))]
    length: u32,

    /// Whole-request timeout in seconds.
    #[arg(long, env = "SUMMARIZER_TIMEOUT", default_value_t = 300)]
    timeout: u64,

    /// Connect timeout in seconds.
    #[arg(long, env = "SUMMARIZER_CONNECT_TIMEOUT", default_value_t = 10)]
    connect_timeout: u64,

    /// Upload the PDF and print the extracted text; do not summarize.
    #[arg(long)]
    extract_only: bool,

    /// Print a preview of the input text before summarizing.
    #[arg(long)]
    preview: bool,

    /// Query the service health endpoint and exit.
    #[arg(long)]
    health: bool,

    /// Output structured JSON instead of text.
    #[arg(long, env = "SUMMARIZER_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "SUMMARIZER_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SUMMARIZER_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the result.
    #[arg(short, long, env = "SUMMARIZER_QUIET")]
    quiet: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    document: Option<DocumentInfo>,
    preview: Option<TextPreview>,
    summary: Option<&'a SummaryResult>,
    view: Option<ResultView>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Library INFO logs are noise next to the spinner; keep them for
    // non-interactive runs only.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    let service = HttpSummaryService::new(config.clone()).context("Failed to create client")?;

    // ── Health mode ──────────────────────────────────────────────────────
    if cli.health {
        let health = service
            .health()
            .await
            .with_context(|| format!("Health check against {} failed", config.base_url))?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&health).context("Failed to serialise health")?
            );
        } else {
            println!(
                "{} {}  model loaded: {}  device: {}",
                if health.is_healthy() { green("●") } else { red("●") },
                bold(&health.status),
                health.model_loaded,
                health.device.as_deref().unwrap_or("unknown")
            );
        }
        return Ok(());
    }

    // ── Orchestrator ─────────────────────────────────────────────────────
    let mut orch = Orchestrator::new(&config);
    if show_progress {
        orch = orch.with_events(CliSpinner::new() as EventsHandle);
    }

    load_input(&cli, &mut orch, &service).await?;
    fail_on_error(&orch)?;

    if cli.preview && !cli.json {
        if let Some(p) = orch.text_preview() {
            eprintln!("{}", bold("Text preview"));
            eprintln!("{}", dim(&p.display()));
            eprintln!("Word count: {}\n", p.word_count_display());
        }
    }

    if cli.extract_only {
        let text = orch
            .document()
            .map(|d| d.raw_text.clone())
            .context("--extract-only needs a PDF input")?;
        write_stdout(&text)?;
        return Ok(());
    }

    orch.summarize(&service).await.context("Cannot summarize")?;
    fail_on_error(&orch)?;

    // ── Output ───────────────────────────────────────────────────────────
    if cli.json {
        let report = JsonReport {
            document: orch.document().map(DocumentInfo::from_record),
            preview: orch.text_preview(),
            summary: orch.summary(),
            view: orch.result_view(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise output")?
        );
    } else if let Some(view) = orch.result_view() {
        write_stdout(&view.summary_text)?;
        if !cli.quiet {
            eprintln!(
                "\n{} {} original words  →  {} summary words  ·  compression {}",
                green("✔"),
                cyan(&view.original_words),
                cyan(&view.summary_words),
                bold(&view.compression),
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ClientConfig`.
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    ClientConfig::builder()
        .base_url(cli.base_url.clone())
        .request_timeout_secs(cli.timeout)
        .connect_timeout_secs(cli.connect_timeout)
        .summary_length(SummaryLength::new(cli.length))
        .user_agent(concat!("paper-summarizer/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Invalid configuration")
}

/// Put the requested input into the orchestrator, ingesting a PDF if given.
async fn load_input(
    cli: &Cli,
    orch: &mut Orchestrator,
    service: &dyn SummaryService,
) -> Result<()> {
    if let Some(ref text) = cli.text {
        orch.set_mode(InputMode::Paste);
        orch.set_pasted_text(text.clone());
        return Ok(());
    }

    if let Some(ref path) = cli.text_file {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read text from {:?}", path))?;
        orch.set_mode(InputMode::Paste);
        orch.set_pasted_text(text);
        return Ok(());
    }

    match cli.input.as_deref() {
        Some("-") => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read text from stdin")?;
            orch.set_mode(InputMode::Paste);
            orch.set_pasted_text(text);
        }
        Some(path) => {
            let file = CandidateFile::from_path(path)
                .await
                .with_context(|| format!("Cannot open {path}"))?;
            orch.set_mode(InputMode::Upload);
            orch.ingest(service, file).await.context("Upload refused")?;
        }
        None => bail!("Nothing to summarize: pass a PDF path, `-`, --text or --text-file"),
    }
    Ok(())
}

/// Turn a populated error slot into a CLI failure.
fn fail_on_error(orch: &Orchestrator) -> Result<()> {
    if let Some(err) = orch.error() {
        bail!("{}", err.message);
    }
    Ok(())
}

fn write_stdout(text: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(text.as_bytes())
        .context("Failed to write to stdout")?;
    if !text.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }
    Ok(())
}
