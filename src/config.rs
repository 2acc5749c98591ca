//! Configuration types for the summarization client.
//!
//! Everything that controls how the client talks to the service lives in
//! [`ClientConfig`], built via its [`ClientConfigBuilder`]. The one knob the
//! user changes between operations, the target summary length, is a
//! [`SummaryLength`] so out-of-range values cannot be represented.

use crate::error::SummarizerError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for the HTTP summarization client.
///
/// Built via [`ClientConfig::builder()`] or using [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use paper_summarizer::{ClientConfig, SummaryLength};
///
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:8000")
///     .request_timeout_secs(120)
///     .summary_length(SummaryLength::new(250))
///     .build()
///     .unwrap();
/// assert_eq!(config.summary_length.get(), 250);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the summarization service. Default: `http://localhost:8000`.
    pub base_url: String,

    /// Whole-request timeout in seconds. Default: 300.
    ///
    /// Summarizing a long paper can take a minute or more on CPU-only
    /// deployments, so this is deliberately generous. A timeout surfaces as a
    /// transport error with the generic per-operation message.
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds. Default: 10.
    pub connect_timeout_secs: u64,

    /// Initial summary length preference. Default: 200.
    pub summary_length: SummaryLength,

    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 300,
            connect_timeout_secs: 10,
            summary_length: SummaryLength::default(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Join `path` onto the base URL, tolerating a trailing slash on either side.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = secs;
        self
    }

    pub fn summary_length(mut self, length: SummaryLength) -> Self {
        self.config.summary_length = length;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = Some(ua.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, SummarizerError> {
        let c = &self.config;
        let url = Url::parse(&c.base_url).map_err(|e| {
            SummarizerError::InvalidConfig(format!("base URL '{}' is invalid: {}", c.base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SummarizerError::InvalidConfig(format!(
                "base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if c.request_timeout_secs == 0 {
            return Err(SummarizerError::InvalidConfig(
                "Request timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Summary length ───────────────────────────────────────────────────────

/// Target summary length in words: 100–400 in steps of 50.
///
/// Values are normalised on construction, the way a stepped range slider
/// would snap them: clamped into range, then rounded to the nearest step
/// (ties round up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct SummaryLength(u32);

impl SummaryLength {
    pub const MIN: u32 = 100;
    pub const MAX: u32 = 400;
    pub const STEP: u32 = 50;
    pub const DEFAULT: u32 = 200;

    pub fn new(words: u32) -> Self {
        let clamped = words.clamp(Self::MIN, Self::MAX);
        let offset = clamped - Self::MIN;
        let steps = (offset + Self::STEP / 2) / Self::STEP;
        Self((Self::MIN + steps * Self::STEP).min(Self::MAX))
    }

    /// The `max_length` request parameter.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The `min_length` request parameter: 40 % of the maximum, rounded down.
    pub fn min_length(self) -> u32 {
        self.0 * 2 / 5
    }
}

impl Default for SummaryLength {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u32> for SummaryLength {
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl From<SummaryLength> for u32 {
    fn from(v: SummaryLength) -> Self {
        v.0
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} words", self.0)
    }
}
