//! Filing records and archive document links.

use crate::identifier::{NormalizedIdentifier, strip_separators};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Base URL of the EDGAR document archive.
pub const ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// A filing as listed in the registry's recent submissions, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawFilingEntry {
    /// Form type (e.g., "10-K", "10-Q")
    pub form: String,
    /// Filing date
    pub filing_date: NaiveDate,
    /// Accession number, with dashes (e.g., "0000320193-23-000077")
    pub accession_number: String,
    /// Primary document filename
    pub primary_document: String,
}

/// A filing that survived selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFiling {
    /// Form type (e.g., "10-K", "10-Q")
    pub form: String,
    /// Filing date
    pub filing_date: NaiveDate,
    /// Accession number, with dashes
    pub accession_number: String,
    /// Primary document filename
    pub primary_document: String,
}

impl From<RawFilingEntry> for SelectedFiling {
    fn from(entry: RawFilingEntry) -> Self {
        Self {
            form: entry.form,
            filing_date: entry.filing_date,
            accession_number: entry.accession_number,
            primary_document: entry.primary_document,
        }
    }
}

impl SelectedFiling {
    /// Get the URL to the primary document for this filing.
    ///
    /// # Example
    /// ```
    /// # use edgarlink::edgar::SelectedFiling;
    /// # use edgarlink::identifier::to_canonical_form;
    /// # use chrono::NaiveDate;
    /// let filing = SelectedFiling {
    ///     form: "10-K".to_string(),
    ///     filing_date: NaiveDate::from_ymd_opt(2023, 11, 3).unwrap(),
    ///     accession_number: "0000320193-23-000077".to_string(),
    ///     primary_document: "aapl-20230930.htm".to_string(),
    /// };
    /// let cik = to_canonical_form(320193).unwrap();
    /// assert!(filing.document_url(&cik).as_str().contains("edgar/data/320193/"));
    /// ```
    pub fn document_url(&self, cik: &NormalizedIdentifier) -> DocumentLink {
        document_link(cik, &self.accession_number, &self.primary_document)
    }
}

/// URL of a filing's primary document in the EDGAR archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentLink(String);

impl DocumentLink {
    /// The URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build an archive link: the plain-integer CIK, the accession number without
/// dashes, then the document name.
pub fn document_link(
    cik: &NormalizedIdentifier,
    accession: &str,
    primary_document: &str,
) -> DocumentLink {
    DocumentLink(format!(
        "{}/{}/{}/{}",
        ARCHIVES_BASE_URL,
        cik.as_integer(),
        strip_separators(accession),
        primary_document
    ))
}
