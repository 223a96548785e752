//! Ticker to CIK lookup.
//!
//! The SEC publishes `company_tickers.json`, a JSON object mapping index keys
//! to `{"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}` records.
//! [`TickerDirectory`] holds that dataset once loaded and answers lookups
//! against it. The loaded record set is immutable and shared, so clones are
//! cheap and concurrent readers never contend.

use crate::error::{EdgarError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Location of the SEC ticker dataset.
pub const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// One company in the ticker dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerRecord {
    /// Uppercase ticker symbol
    pub ticker: String,
    /// Central Index Key as published
    pub identifier: i64,
    /// Company name, when the dataset carries one
    pub title: Option<String>,
}

/// Raw company ticker data from SEC JSON.
#[derive(Debug, Deserialize)]
struct CompanyTicker {
    cik_str: RawCik,
    ticker: String,
    #[serde(default)]
    title: Option<String>,
}

/// `cik_str` is a number in the published file, but older mirrors quote it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCik {
    Number(i64),
    Text(String),
}

impl RawCik {
    fn into_identifier(self) -> Result<i64> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| EdgarError::Parse(format!("Invalid cik_str: '{}'", s))),
        }
    }
}

impl TryFrom<CompanyTicker> for TickerRecord {
    type Error = EdgarError;

    fn try_from(company: CompanyTicker) -> Result<Self> {
        Ok(Self {
            ticker: company.ticker.to_uppercase(),
            identifier: company.cik_str.into_identifier()?,
            title: company.title,
        })
    }
}

/// Lookup table from ticker symbols to CIKs.
///
/// A default-constructed directory is unloaded and every lookup fails with
/// [`EdgarError::NotLoaded`].
#[derive(Debug, Clone, Default)]
pub struct TickerDirectory {
    records: Option<Arc<[TickerRecord]>>,
}

impl TickerDirectory {
    /// A directory whose dataset has not been loaded.
    pub const fn unloaded() -> Self {
        Self { records: None }
    }

    /// Build a loaded directory from records in dataset order.
    pub fn from_records(records: impl IntoIterator<Item = TickerRecord>) -> Self {
        Self {
            records: Some(records.into_iter().collect()),
        }
    }

    /// Parse a `company_tickers.json` document.
    ///
    /// Accepts either the published object form or a plain array of records.
    /// For the object form, dataset order follows JavaScript property order:
    /// integer keys ascending, then the remaining keys as they appear.
    ///
    /// Records that cannot be read (missing or null fields, a non-numeric
    /// `cik_str`) are skipped with a warning.
    ///
    /// # Errors
    /// Returns [`EdgarError::Parse`] if the document is not valid JSON or is
    /// neither an object nor an array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| EdgarError::Parse(format!("Failed to parse ticker data: {}", e)))?;
        Self::from_value(value)
    }

    /// Parse a `company_tickers.json` document from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)
            .map_err(|e| EdgarError::Parse(format!("Failed to parse ticker data: {}", e)))?;
        Self::from_value(value)
    }

    /// Load a local `company_tickers.json` file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading ticker data");
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Download the raw ticker dataset.
    ///
    /// # Arguments
    /// * `client` - HTTP client, which must send an identifying User-Agent
    /// * `url` - Dataset location, normally [`COMPANY_TICKERS_URL`]
    pub async fn download(client: &reqwest::Client, url: &str) -> Result<String> {
        debug!(url, "downloading ticker data");
        let response = client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(EdgarError::Http(format!(
                "Failed to fetch company tickers: HTTP {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    /// Download and parse the ticker dataset.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Self> {
        let body = Self::download(client, url).await?;
        Self::from_json_str(&body)
    }

    fn from_value(value: Value) -> Result<Self> {
        let values: Vec<Value> = match value {
            Value::Array(items) => items,
            Value::Object(map) => {
                let mut entries: Vec<(String, Value)> = map.into_iter().collect();
                // Stable, so non-index keys keep document order.
                entries.sort_by_key(|(key, _)| array_index(key).map_or((1, 0), |idx| (0, idx)));
                entries.into_iter().map(|(_, v)| v).collect()
            }
            other => {
                return Err(EdgarError::Parse(format!(
                    "Ticker data must be an object or array, got {}",
                    json_kind(&other)
                )));
            }
        };

        let total = values.len();
        // A bad record only hides itself; the rest of the dataset stays usable.
        let records: Vec<TickerRecord> = values
            .into_iter()
            .enumerate()
            .filter_map(|(position, v)| {
                let record = serde_json::from_value::<CompanyTicker>(v)
                    .map_err(|e| EdgarError::Parse(format!("Invalid ticker record: {}", e)))
                    .and_then(TickerRecord::try_from);
                record
                    .inspect_err(|e| warn!(position, error = %e, "skipping ticker record"))
                    .ok()
            })
            .collect();

        info!(
            count = records.len(),
            skipped = total - records.len(),
            "loaded ticker data"
        );
        Ok(Self::from_records(records))
    }

    /// Whether the dataset has been loaded.
    pub const fn is_loaded(&self) -> bool {
        self.records.is_some()
    }

    /// Number of records; zero when unloaded.
    pub fn len(&self) -> usize {
        self.records.as_ref().map_or(0, |r| r.len())
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the first record whose ticker matches, case-insensitively.
    ///
    /// # Errors
    /// [`EdgarError::NotLoaded`] before the dataset is loaded,
    /// [`EdgarError::NotFound`] when no record matches.
    pub fn record(&self, ticker: &str) -> Result<&TickerRecord> {
        let records = self.records.as_deref().ok_or(EdgarError::NotLoaded)?;
        let ticker_upper = ticker.to_uppercase();

        let found = records.iter().find(|r| r.ticker == ticker_upper);
        debug!(ticker = %ticker_upper, found = found.is_some(), "ticker lookup");
        found.ok_or_else(|| EdgarError::NotFound(ticker.to_string()))
    }

    /// Look up the CIK for a ticker symbol.
    ///
    /// When a ticker appears more than once, the first record in dataset order
    /// wins.
    ///
    /// # Example
    /// ```
    /// # use edgarlink::directory::TickerDirectory;
    /// let directory = TickerDirectory::from_json_str(
    ///     r#"{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}}"#,
    /// ).unwrap();
    /// assert_eq!(directory.resolve("aapl").unwrap(), 320193);
    /// ```
    pub fn resolve(&self, ticker: &str) -> Result<i64> {
        self.record(ticker).map(|r| r.identifier)
    }

    /// All tickers in dataset order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.records
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|r| r.ticker.as_str())
    }
}

/// JavaScript array-index keys: canonical decimal integers below 2^32 - 1.
fn array_index(key: &str) -> Option<u32> {
    let idx: u32 = key.parse().ok()?;
    (idx != u32::MAX && idx.to_string() == key).then_some(idx)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
