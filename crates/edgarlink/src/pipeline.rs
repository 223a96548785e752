//! Ticker to filings pipeline.
//!
//! A run normalizes the ticker, resolves it to a CIK, points the chart at the
//! symbol, fetches the filer's history and selects the filings to show. The
//! first failure ends the run; nothing partial is returned.

use crate::chart::{ChartNotifier, NoopChart};
use crate::config::SelectionConfig;
use crate::directory::TickerDirectory;
use crate::edgar::{DocumentLink, FilingSource, SelectedFiling};
use crate::error::{EdgarError, Result};
use crate::identifier::{NormalizedIdentifier, to_canonical_form};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Result of a pipeline run.
pub type PipelineResult = Result<PipelineOutput>;

/// Filings selected for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutput {
    /// Normalized ticker symbol
    pub ticker: String,
    /// Canonical CIK
    pub identifier: NormalizedIdentifier,
    /// Company name from the ticker dataset
    pub company: Option<String>,
    /// Selected filings, grouped by form type then most recent first
    pub filings: Vec<SelectedFiling>,
}

impl PipelineOutput {
    /// Each selected filing with the link to its primary document.
    pub fn links(&self) -> impl Iterator<Item = (&SelectedFiling, DocumentLink)> {
        self.filings
            .iter()
            .map(|filing| (filing, filing.document_url(&self.identifier)))
    }

    /// Whether no filing matched the selection.
    pub fn is_empty(&self) -> bool {
        self.filings.is_empty()
    }
}

/// Trim and uppercase raw ticker input.
///
/// # Errors
/// [`EdgarError::EmptyInput`] if nothing is left after trimming.
pub fn normalize_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(EdgarError::EmptyInput);
    }
    Ok(ticker)
}

/// Resolves tickers and selects their recent filings.
#[derive(Debug)]
pub struct Pipeline<S, C = NoopChart> {
    directory: TickerDirectory,
    source: S,
    chart: C,
    selection: SelectionConfig,
}

impl<S, C> Pipeline<S, C>
where
    S: FilingSource,
    C: ChartNotifier,
{
    /// Create a pipeline with the default filing selection.
    pub fn new(directory: TickerDirectory, source: S, chart: C) -> Self {
        Self {
            directory,
            source,
            chart,
            selection: SelectionConfig::default(),
        }
    }

    /// Use a different filing selection.
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// The ticker directory.
    pub const fn directory(&self) -> &TickerDirectory {
        &self.directory
    }

    /// The filing selection in use.
    pub const fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    /// The chart collaborator.
    pub const fn chart(&self) -> &C {
        &self.chart
    }

    /// Run the pipeline for raw user input.
    ///
    /// The chart is updated exactly once per resolved ticker, before the
    /// filing fetch, and its failures are logged and ignored. An empty
    /// selection is a successful run.
    ///
    /// # Errors
    /// [`EdgarError::EmptyInput`], [`EdgarError::NotLoaded`],
    /// [`EdgarError::NotFound`], [`EdgarError::InvalidIdentifier`], or any
    /// error from the filing source.
    #[instrument(skip(self))]
    pub async fn run(&self, raw_ticker: &str) -> PipelineResult {
        let ticker = normalize_ticker(raw_ticker)?;
        let record = self.directory.record(&ticker)?;
        let identifier = to_canonical_form(record.identifier)?;

        if let Err(e) = self.chart.update_symbol(&ticker) {
            warn!(%ticker, error = %e, "chart update failed");
        }

        let entries = self.source.fetch_history(&identifier).await?;
        let filings = self.selection.select(&entries);
        info!(
            %ticker,
            cik = %identifier,
            history = entries.len(),
            selected = filings.len(),
            "pipeline complete"
        );

        Ok(PipelineOutput {
            ticker,
            identifier,
            company: record.title.clone(),
            filings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::TickerRecord;
    use crate::edgar::RawFilingEntry;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that hands back a fixed history, or a retrieval failure.
    #[derive(Debug, Default)]
    struct StaticSource {
        entries: Vec<RawFilingEntry>,
        fail_status: Option<u16>,
        calls: AtomicUsize,
        last_cik: Mutex<Option<NormalizedIdentifier>>,
    }

    impl FilingSource for StaticSource {
        async fn fetch_history(&self, cik: &NormalizedIdentifier) -> Result<Vec<RawFilingEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_cik.lock().unwrap() = Some(cik.clone());
            match self.fail_status {
                Some(status) => Err(EdgarError::Retrieval {
                    cik: cik.to_string(),
                    status,
                }),
                None => Ok(self.entries.clone()),
            }
        }
    }

    #[derive(Debug, Default)]
    struct RecordingChart {
        symbols: Mutex<Vec<String>>,
        fail: bool,
    }

    impl ChartNotifier for RecordingChart {
        fn update_symbol(&self, symbol: &str) -> Result<()> {
            self.symbols.lock().unwrap().push(symbol.to_string());
            if self.fail {
                return Err(EdgarError::Chart("widget unavailable".to_string()));
            }
            Ok(())
        }
    }

    fn entry(form: &str, date: &str, accession: &str) -> RawFilingEntry {
        RawFilingEntry {
            form: form.to_string(),
            filing_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            accession_number: accession.to_string(),
            primary_document: "doc.htm".to_string(),
        }
    }

    fn directory() -> TickerDirectory {
        TickerDirectory::from_records([
            TickerRecord {
                ticker: "ABC".to_string(),
                identifier: 320193,
                title: Some("ABC Corp".to_string()),
            },
            TickerRecord {
                ticker: "MSFT".to_string(),
                identifier: 789019,
                title: None,
            },
            TickerRecord {
                ticker: "HUGE".to_string(),
                identifier: 12_345_678_901,
                title: None,
            },
        ])
    }

    #[tokio::test]
    async fn test_run_resolves_and_selects() {
        let source = StaticSource {
            entries: vec![
                entry("10-K", "2023-01-01", "0000320193-23-000001"),
                entry("10-K", "2024-01-01", "0000320193-24-000001"),
                entry("8-K", "2023-06-01", "0000320193-23-000002"),
                entry("4", "2024-02-01", "0000320193-24-000002"),
            ],
            ..StaticSource::default()
        };
        let pipeline = Pipeline::new(directory(), source, RecordingChart::default())
            .with_selection(SelectionConfig::new(["10-K", "8-K"], 1));

        let output = pipeline.run("abc").await.unwrap();
        assert_eq!(output.ticker, "ABC");
        assert_eq!(output.identifier.as_str(), "0000320193");
        assert_eq!(output.company.as_deref(), Some("ABC Corp"));
        assert_eq!(output.filings.len(), 2);
        assert_eq!(output.filings[0].accession_number, "0000320193-24-000001");
        assert_eq!(output.filings[1].form, "8-K");

        let links: Vec<_> = output.links().map(|(_, link)| link.to_string()).collect();
        assert_eq!(
            links[0],
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000001/doc.htm"
        );
        assert_eq!(*pipeline.chart().symbols.lock().unwrap(), vec!["ABC"]);
    }

    #[test]
    fn test_accessors() {
        let pipeline = Pipeline::new(directory(), StaticSource::default(), RecordingChart::default());
        assert_eq!(pipeline.directory().len(), 3);
        assert_eq!(*pipeline.selection(), SelectionConfig::default());

        let pipeline = pipeline.with_selection(SelectionConfig::new(["DEF 14A"], 2));
        assert_eq!(pipeline.selection().categories, vec!["DEF 14A"]);
        assert_eq!(pipeline.selection().per_category_limit, 2);
        assert_eq!(pipeline.directory().resolve("MSFT").unwrap(), 789019);
    }

    #[tokio::test]
    async fn test_run_trims_and_uppercases() {
        let pipeline = Pipeline::new(directory(), StaticSource::default(), RecordingChart::default());

        let output = pipeline.run("  msft ").await.unwrap();
        assert_eq!(output.ticker, "MSFT");
        assert_eq!(
            pipeline.source.last_cik.lock().unwrap().as_ref().unwrap().as_str(),
            "0000789019"
        );
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_run_empty_input() {
        let pipeline = Pipeline::new(directory(), StaticSource::default(), RecordingChart::default());

        let result = pipeline.run("   ").await;
        assert!(matches!(result, Err(EdgarError::EmptyInput)));
        assert_eq!(pipeline.source.calls.load(Ordering::SeqCst), 0);
        assert!(pipeline.chart().symbols.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_unknown_ticker_short_circuits() {
        let pipeline = Pipeline::new(directory(), StaticSource::default(), RecordingChart::default());

        let result = pipeline.run("zzzz").await;
        assert!(matches!(result, Err(EdgarError::NotFound(t)) if t == "ZZZZ"));
        assert_eq!(pipeline.source.calls.load(Ordering::SeqCst), 0);
        assert!(pipeline.chart().symbols.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_directory_not_loaded() {
        let pipeline = Pipeline::new(
            TickerDirectory::unloaded(),
            StaticSource::default(),
            NoopChart,
        );
        assert!(matches!(pipeline.run("ABC").await, Err(EdgarError::NotLoaded)));
    }

    #[tokio::test]
    async fn test_run_invalid_identifier() {
        let pipeline = Pipeline::new(directory(), StaticSource::default(), RecordingChart::default());

        let result = pipeline.run("HUGE").await;
        assert!(matches!(
            result,
            Err(EdgarError::InvalidIdentifier(12_345_678_901))
        ));
        assert_eq!(pipeline.source.calls.load(Ordering::SeqCst), 0);
        assert!(pipeline.chart().symbols.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retrieval_failure_still_updates_chart() {
        let source = StaticSource {
            fail_status: Some(404),
            ..StaticSource::default()
        };
        let pipeline = Pipeline::new(directory(), source, RecordingChart::default());

        let result = pipeline.run("MSFT").await;
        assert!(matches!(
            result,
            Err(EdgarError::Retrieval { ref cik, status: 404 }) if cik == "0000789019"
        ));
        assert_eq!(*pipeline.chart().symbols.lock().unwrap(), vec!["MSFT"]);
    }

    #[tokio::test]
    async fn test_chart_failure_does_not_fail_run() {
        let source = StaticSource {
            entries: vec![entry("10-Q", "2024-04-30", "0000789019-24-000003")],
            ..StaticSource::default()
        };
        let chart = RecordingChart {
            fail: true,
            ..RecordingChart::default()
        };
        let pipeline = Pipeline::new(directory(), source, chart);

        let output = pipeline.run("MSFT").await.unwrap();
        assert_eq!(output.filings.len(), 1);
        assert_eq!(pipeline.chart().symbols.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker("  msft ").unwrap(), "MSFT");
        assert_eq!(normalize_ticker("BRK.B").unwrap(), "BRK.B");
        assert!(matches!(normalize_ticker("\t\n"), Err(EdgarError::EmptyInput)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(EdgarError::EmptyInput.to_string(), "Please enter a ticker");
        assert_eq!(
            EdgarError::NotFound("ZZZZ".to_string()).to_string(),
            "Ticker 'ZZZZ' not found"
        );
        assert_eq!(
            EdgarError::Retrieval {
                cik: "0000320193".to_string(),
                status: 404
            }
            .to_string(),
            "Failed to fetch filings for CIK 0000320193: HTTP 404"
        );
    }
}
