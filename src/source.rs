//! Row sources: where the catalog's CSV comes from.
//!
//! A [`RowSource`] fetches the whole document once and returns every
//! record as a header→value [`Row`], in document order. Sources do no
//! filtering; activity-flag handling belongs to the entity builder.
//!
//! | Source | Config | Transport |
//! |--------|--------|-----------|
//! | [`HttpCsvSource`] | `source.url` | HTTP GET (reqwest, rustls) |
//! | [`FileCsvSource`] | `source.path` | local file (tokio fs) |

use anyhow::{Context, Result};
use async_trait::async_trait;
use competency_lens_core::models::Row;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;

/// A tabular data source yielding parsed rows.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use anyhow::Result;
/// use competency_lens::source::{parse_csv, RowSource};
/// use competency_lens_core::models::Row;
///
/// pub struct InlineSource(&'static str);
///
/// #[async_trait]
/// impl RowSource for InlineSource {
///     fn name(&self) -> String { "inline".to_string() }
///
///     async fn fetch_rows(&self) -> Result<Vec<Row>> {
///         parse_csv(self.0)
///     }
/// }
/// ```
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Human-readable label for logs, e.g. the URL or file path.
    fn name(&self) -> String;

    /// Fetch and parse the full row sequence.
    ///
    /// Fails if the source is unreachable or the payload is not CSV.
    async fn fetch_rows(&self) -> Result<Vec<Row>>;
}

/// Parse CSV text with a header row.
///
/// Records shorter than the header leave the trailing columns absent;
/// values past the last header are ignored. Blank lines are skipped.
pub fn parse_csv(text: &str) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .with_context(|| "Failed to read CSV header row")?
        .clone();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV record {}", i + 1))?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// CSV downloaded over HTTP(S).
pub struct HttpCsvSource {
    url: String,
    timeout: Duration,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl RowSource for HttpCsvSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        let body = client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", self.url))?
            .error_for_status()
            .with_context(|| format!("Bad response from {}", self.url))?
            .text()
            .await
            .with_context(|| format!("Failed to read body from {}", self.url))?;

        parse_csv(&body)
    }
}

/// CSV read from the local filesystem.
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RowSource for FileCsvSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        parse_csv(&text)
    }
}

/// The source named in `[source]`.
pub fn source_from_config(config: &Config) -> Result<Box<dyn RowSource>> {
    let src = &config.source;
    match (&src.url, &src.path) {
        (Some(url), None) => Ok(Box::new(HttpCsvSource::new(
            url.clone(),
            Duration::from_secs(src.timeout_secs),
        ))),
        (None, Some(path)) => Ok(Box::new(FileCsvSource::new(path.clone()))),
        _ => anyhow::bail!("exactly one of source.url or source.path must be set"),
    }
}
