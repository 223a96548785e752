//! Ticker dataset location and caching.
//!
//! The dataset is read from a local `company_tickers.json`. When the file is
//! missing it is downloaded from the SEC once and kept in the cache directory.

use edgarlink::directory::COMPANY_TICKERS_URL;
use edgarlink::{EdgarClient, EdgarError, TickerDirectory};
use std::path::{Path, PathBuf};
use tracing::info;

/// Get the default cache directory path.
///
/// Uses platform-specific cache directories:
/// - Linux: `~/.cache/edgarlink/`
/// - macOS: `~/Library/Caches/edgarlink/`
/// - Windows: `%LOCALAPPDATA%\edgarlink\`
pub(crate) fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("edgarlink")
}

/// Get the default ticker dataset path.
pub(crate) fn default_tickers_path() -> PathBuf {
    default_cache_dir().join("company_tickers.json")
}

/// How the dataset may be obtained.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DatasetOptions {
    /// Never download; a missing file is an error
    pub(crate) offline: bool,
    /// Download even if the file exists
    pub(crate) refresh: bool,
}

/// Load the ticker directory from `path`, downloading it first if needed.
pub(crate) async fn load_directory(
    path: &Path,
    client: &EdgarClient,
    options: DatasetOptions,
) -> Result<TickerDirectory, EdgarError> {
    if options.offline || (path.exists() && !options.refresh) {
        return TickerDirectory::load_file(path);
    }

    info!(url = COMPANY_TICKERS_URL, "downloading ticker data");
    let body = TickerDirectory::download(client.http(), COMPANY_TICKERS_URL).await?;
    // Only cache a dataset that parses.
    let directory = TickerDirectory::from_json_str(&body)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)?;
    info!(path = %path.display(), "cached ticker data");

    Ok(directory)
}
