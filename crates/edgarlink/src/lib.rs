#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/edgarlink/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod config;
pub mod directory;
pub mod edgar;
pub mod error;
pub mod identifier;
pub mod pipeline;
pub mod selector;

pub use chart::{ChartNotifier, NoopChart, TradingViewChart};
pub use config::{ClientConfig, SelectionConfig};
pub use directory::{TickerDirectory, TickerRecord};
pub use edgar::{DocumentLink, EdgarClient, FilingSource, RawFilingEntry, SelectedFiling};
pub use error::{EdgarError, Result};
pub use identifier::NormalizedIdentifier;
pub use pipeline::{Pipeline, PipelineOutput, PipelineResult};
pub use selector::select_top_filings;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
