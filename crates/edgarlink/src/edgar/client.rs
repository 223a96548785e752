//! SEC EDGAR submissions API client.

use super::filings::RawFilingEntry;
use crate::config::ClientConfig;
use crate::error::{EdgarError, Result};
use crate::identifier::NormalizedIdentifier;
use chrono::NaiveDate;
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, info};

/// Submissions document returned by `/submissions/CIK##########.json`.
#[derive(Debug, Deserialize)]
struct Submissions {
    /// Company name
    #[serde(default)]
    name: Option<String>,
    filings: FilingsContainer,
}

#[derive(Debug, Deserialize)]
struct FilingsContainer {
    recent: FilingsRecent,
}

/// Recent filings data.
///
/// The SEC API returns filing information as parallel arrays where
/// each index corresponds to a single filing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilingsRecent {
    form: Vec<String>,
    filing_date: Vec<String>,
    accession_number: Vec<String>,
    primary_document: Vec<String>,
}

impl FilingsRecent {
    /// Zip the parallel arrays into entries, keeping registry order.
    fn into_entries(self) -> Result<Vec<RawFilingEntry>> {
        let len = self.form.len();
        if self.filing_date.len() != len
            || self.accession_number.len() != len
            || self.primary_document.len() != len
        {
            return Err(EdgarError::MalformedResponse(format!(
                "filings.recent arrays differ in length: form={}, filingDate={}, \
                 accessionNumber={}, primaryDocument={}",
                len,
                self.filing_date.len(),
                self.accession_number.len(),
                self.primary_document.len()
            )));
        }

        self.form
            .into_iter()
            .zip(self.filing_date)
            .zip(self.accession_number)
            .zip(self.primary_document)
            .map(|(((form, date), accession_number), primary_document)| {
                let filing_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
                    EdgarError::MalformedResponse(format!("Invalid filing date '{}': {}", date, e))
                })?;
                Ok(RawFilingEntry {
                    form,
                    filing_date,
                    accession_number,
                    primary_document,
                })
            })
            .collect()
    }
}

/// Anything that can produce a filer's recent filing history.
pub trait FilingSource {
    /// Fetch the recent filings for a CIK, in the order the source lists them.
    fn fetch_history(
        &self,
        cik: &NormalizedIdentifier,
    ) -> impl Future<Output = Result<Vec<RawFilingEntry>>> + Send;
}

/// SEC EDGAR submissions API client.
pub struct EdgarClient {
    client: reqwest::Client,
    base_url: String,
}

impl EdgarClient {
    /// Create a new EDGAR client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new EDGAR client from explicit settings.
    ///
    /// # Example
    /// ```no_run
    /// use edgarlink::{ClientConfig, EdgarClient};
    /// use std::time::Duration;
    ///
    /// # fn example() -> edgarlink::Result<()> {
    /// let config = ClientConfig::default()
    ///     .with_user_agent("Example Research admin@example.com")
    ///     .with_timeout(Duration::from_secs(30));
    /// let client = EdgarClient::with_config(&config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(EdgarError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The underlying HTTP client, already carrying the User-Agent.
    pub const fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Submissions endpoint for a CIK.
    pub fn submissions_url(&self, cik: &NormalizedIdentifier) -> String {
        format!("{}/submissions/CIK{}.json", self.base_url, cik)
    }

    /// Get a company's recent filings.
    ///
    /// # Errors
    /// - [`EdgarError::Retrieval`] if EDGAR answers with a non-success status
    /// - [`EdgarError::MalformedResponse`] if the body lacks the
    ///   `filings.recent` arrays or the arrays differ in length
    /// - [`EdgarError::MalformedResponse`] if any `filingDate` is not a
    ///   `YYYY-MM-DD` calendar date, whatever its form type. Dates are checked
    ///   here so selection can order real dates instead of strings.
    /// - [`EdgarError::Network`] on transport failure
    pub async fn get_company_filings(
        &self,
        cik: &NormalizedIdentifier,
    ) -> Result<Vec<RawFilingEntry>> {
        let url = self.submissions_url(cik);
        debug!(%url, "fetching submissions");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EdgarError::Retrieval {
                cik: cik.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let submissions: Submissions = serde_json::from_slice(&body).map_err(|e| {
            EdgarError::MalformedResponse(format!("Failed to parse company filings: {}", e))
        })?;

        let entries = submissions.filings.recent.into_entries()?;
        info!(
            %cik,
            company = submissions.name.as_deref().unwrap_or("unknown"),
            count = entries.len(),
            "fetched filing history"
        );
        Ok(entries)
    }
}

impl FilingSource for EdgarClient {
    fn fetch_history(
        &self,
        cik: &NormalizedIdentifier,
    ) -> impl Future<Output = Result<Vec<RawFilingEntry>>> + Send {
        self.get_company_filings(cik)
    }
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
