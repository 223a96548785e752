//! Price chart symbol updates.
//!
//! The pipeline tells a chart which symbol to show once a ticker resolves.
//! Charts are best-effort: a failure here never fails a pipeline run.

use crate::error::{EdgarError, Result};
use reqwest::Url;
use std::sync::RwLock;

/// TradingView chart page.
pub const TRADINGVIEW_CHART_URL: &str = "https://www.tradingview.com/chart/";

/// Receives the symbol a price chart should display.
pub trait ChartNotifier {
    /// Switch the chart to `symbol`.
    fn update_symbol(&self, symbol: &str) -> Result<()>;
}

impl<T: ChartNotifier + ?Sized> ChartNotifier for &T {
    fn update_symbol(&self, symbol: &str) -> Result<()> {
        (**self).update_symbol(symbol)
    }
}

/// A chart that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChart;

impl ChartNotifier for NoopChart {
    fn update_symbol(&self, _symbol: &str) -> Result<()> {
        Ok(())
    }
}

/// Display settings for a TradingView chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSettings {
    /// Bar interval ("D" for daily)
    pub interval: String,
    /// Timezone name
    pub timezone: String,
    /// "light" or "dark"
    pub theme: String,
    /// Bar style code ("1" for candles)
    pub style: String,
    /// UI locale
    pub locale: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            interval: "D".to_string(),
            timezone: "Etc/UTC".to_string(),
            theme: "light".to_string(),
            style: "1".to_string(),
            locale: "en".to_string(),
        }
    }
}

/// Chart that tracks the TradingView page for the latest symbol.
///
/// Each update replaces the previous chart.
#[derive(Debug, Default)]
pub struct TradingViewChart {
    settings: ChartSettings,
    current: RwLock<Option<Url>>,
}

impl TradingViewChart {
    /// Create a chart with custom settings.
    pub const fn with_settings(settings: ChartSettings) -> Self {
        Self {
            settings,
            current: RwLock::new(None),
        }
    }

    /// Chart URL for a symbol under this chart's settings.
    pub fn chart_url(&self, symbol: &str) -> Result<Url> {
        if symbol.trim().is_empty() {
            return Err(EdgarError::Chart("empty symbol".to_string()));
        }
        Url::parse_with_params(
            TRADINGVIEW_CHART_URL,
            [
                ("symbol", symbol),
                ("interval", self.settings.interval.as_str()),
                ("timezone", self.settings.timezone.as_str()),
                ("theme", self.settings.theme.as_str()),
                ("style", self.settings.style.as_str()),
                ("locale", self.settings.locale.as_str()),
            ],
        )
        .map_err(|e| EdgarError::Chart(e.to_string()))
    }

    /// URL of the chart currently shown, if any.
    pub fn current_url(&self) -> Option<Url> {
        self.current.read().ok().and_then(|url| url.clone())
    }
}

impl ChartNotifier for TradingViewChart {
    fn update_symbol(&self, symbol: &str) -> Result<()> {
        let url = self.chart_url(symbol)?;
        let mut current = self
            .current
            .write()
            .map_err(|_| EdgarError::Chart("chart state poisoned".to_string()))?;
        *current = Some(url);
        Ok(())
    }
}
