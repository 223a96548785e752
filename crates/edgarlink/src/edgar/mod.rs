//! SEC EDGAR filing retrieval.
//!
//! This module provides:
//! - [`EdgarClient`], which fetches a filer's recent submissions
//! - [`FilingSource`], the seam the pipeline retrieves through
//! - Filing records and archive document links
//!
//! # Example
//!
//! ```no_run
//! use edgarlink::edgar::EdgarClient;
//! use edgarlink::identifier::to_canonical_form;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new()?;
//!     let cik = to_canonical_form(320193)?;
//!     let filings = client.get_company_filings(&cik).await?;
//!     println!("Found {} recent filings", filings.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod filings;

pub use client::{EdgarClient, FilingSource};
pub use filings::{ARCHIVES_BASE_URL, DocumentLink, RawFilingEntry, SelectedFiling, document_link};
