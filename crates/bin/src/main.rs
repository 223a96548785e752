//! edgarlink CLI binary.
//!
//! Looks up a ticker's recent SEC filings and prints links to them.

mod integration;

use clap::{Parser, ValueEnum};
use edgarlink::config::{DEFAULT_PER_CATEGORY_LIMIT, USER_AGENT};
use edgarlink::{
    ClientConfig, EdgarClient, Pipeline, SelectionConfig, TickerDirectory, TradingViewChart,
};
use indicatif::{ProgressBar, ProgressStyle};
use integration::dataset::{DatasetOptions, default_tickers_path, load_directory};
use integration::render::{render_json, render_text};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "edgarlink")]
#[command(about = "Recent SEC filings for a stock ticker", long_about = None)]
#[command(version)]
struct Cli {
    /// Stock ticker symbol
    ticker: String,

    /// Path to company_tickers.json (defaults to the cache directory)
    #[arg(long)]
    tickers: Option<PathBuf>,

    /// Never download the ticker dataset
    #[arg(long)]
    offline: bool,

    /// Re-download the ticker dataset
    #[arg(long, conflicts_with = "offline")]
    refresh: bool,

    /// Form type to include; repeat for several (default: 10-K, 10-Q, 8-K)
    #[arg(long = "form", value_name = "FORM")]
    forms: Vec<String>,

    /// Filings shown per form type
    #[arg(long, default_value_t = DEFAULT_PER_CATEGORY_LIMIT)]
    limit: usize,

    /// User-Agent sent to the SEC (should include contact details)
    #[arg(long, default_value = USER_AGENT)]
    user_agent: String,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Do not print the chart link
    #[arg(long)]
    no_chart: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut client_config = ClientConfig::default().with_user_agent(cli.user_agent.as_str());
    if let Some(secs) = cli.timeout {
        client_config = client_config.with_timeout(Duration::from_secs(secs));
    }
    let client = EdgarClient::with_config(&client_config)?;

    let spinner = spinner("Loading ticker data...");
    let path = cli.tickers.clone().unwrap_or_else(default_tickers_path);
    let options = DatasetOptions {
        offline: cli.offline,
        refresh: cli.refresh,
    };
    // A failed load leaves the directory unloaded; the run then reports it.
    let directory = match load_directory(&path, &client, options).await {
        Ok(directory) => directory,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load ticker data");
            spinner.suspend(|| eprintln!("Failed to load ticker data: {}", e));
            TickerDirectory::unloaded()
        }
    };

    spinner.set_message("Fetching filings...");
    let chart = TradingViewChart::default();
    let pipeline = Pipeline::new(directory, client, &chart).with_selection(selection(&cli));
    info!(
        tickers = pipeline.directory().len(),
        forms = ?pipeline.selection().categories,
        limit = pipeline.selection().per_category_limit,
        "running pipeline"
    );
    let result = pipeline.run(&cli.ticker).await;
    spinner.finish_and_clear();

    let chart_url = if cli.no_chart {
        None
    } else {
        chart.current_url()
    };

    match cli.format {
        OutputFormat::Text => {
            // The chart is independent of the filings and may exist even if they failed.
            if let Some(url) = &chart_url {
                println!("Chart: {}\n", url);
            }
            let output = result?;
            render_text(&output, &mut std::io::stdout().lock())?;
        }
        OutputFormat::Json => {
            let output = result?;
            let doc = render_json(&output, chart_url.as_ref().map(|u| u.as_str()));
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }

    Ok(())
}

fn selection(cli: &Cli) -> SelectionConfig {
    if cli.forms.is_empty() {
        SelectionConfig {
            per_category_limit: cli.limit,
            ..SelectionConfig::default()
        }
    } else {
        SelectionConfig::new(cli.forms.iter().cloned(), cli.limit)
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["edgarlink", "aapl"]).unwrap();
        assert_eq!(cli.ticker, "aapl");
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(selection(&cli), SelectionConfig::default());
        assert_eq!(cli.user_agent, USER_AGENT);
    }

    #[test]
    fn test_cli_forms_and_limit() {
        let cli = Cli::try_parse_from([
            "edgarlink", "msft", "--form", "10-K", "--form", "DEF 14A", "--limit", "2",
        ])
        .unwrap();
        assert_eq!(selection(&cli), SelectionConfig::new(["10-K", "DEF 14A"], 2));
    }

    #[test]
    fn test_cli_limit_keeps_default_forms() {
        let cli = Cli::try_parse_from(["edgarlink", "msft", "--limit", "1"]).unwrap();
        let selection = selection(&cli);
        assert_eq!(selection.categories, vec!["10-K", "10-Q", "8-K"]);
        assert_eq!(selection.per_category_limit, 1);
    }

    #[rstest]
    #[case(&["edgarlink"])]
    #[case(&["edgarlink", "aapl", "--offline", "--refresh"])]
    #[case(&["edgarlink", "aapl", "--format", "xml"])]
    fn test_cli_rejects(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
