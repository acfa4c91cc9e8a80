//! Configuration structures.

use breadth_analysis::AnalysisConfig;
use breadth_core::error::BreadthError;
use breadth_core::types::{ChartFormat, Interval, Lookback, Theme};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Large-cap constituents analysed by default.
pub const DEFAULT_TICKERS: [&str; 50] = [
    "AAPL", "MSFT", "GOOG", "AMZN", "NVDA", "TSLA", "META", "BRK-B", "UNH", "JNJ",
    "XOM", "V", "PG", "HD", "JPM", "MA", "CVX", "ABBV", "MRK", "PEP",
    "KO", "LLY", "BAC", "AVGO", "TMO", "COST", "DIS", "MCD", "CSCO", "ACN",
    "WMT", "ABT", "DHR", "LIN", "NKE", "NEE", "TXN", "VZ", "RTX", "PM",
    "ADBE", "NFLX", "AMD", "ORCL", "CRM", "INTC", "QCOM", "IBM", "HON", "CAT",
];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub universe: UniverseSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

impl AppConfig {
    /// Check cross-field constraints the types cannot express.
    pub fn validate(&self) -> Result<(), BreadthError> {
        let invalid = |msg: String| Err(BreadthError::Config(msg));

        if self.universe.tickers.is_empty() {
            return invalid("universe.tickers must not be empty".to_string());
        }
        if self.universe.benchmark.trim().is_empty() {
            return invalid("universe.benchmark must not be empty".to_string());
        }
        if self.universe.tickers.contains(&self.universe.benchmark) {
            return invalid(format!(
                "benchmark {} must not also be a constituent",
                self.universe.benchmark
            ));
        }
        if self.analysis.sma_window == 0 {
            return invalid("analysis.sma_window must be greater than 0".to_string());
        }
        if self.data.concurrency == 0 {
            return invalid("data.concurrency must be greater than 0".to_string());
        }
        if self.data.provider == Provider::Csv && self.data.csv_path.is_none() {
            return invalid("data.csv_path is required for the csv provider".to_string());
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return invalid("charts.width and charts.height must be positive".to_string());
        }

        self.data.interval()?;
        self.data.lookback()?;
        Ok(())
    }

    /// Analysis parameters with the annualization factor of the data interval.
    pub fn analysis_config(&self) -> Result<AnalysisConfig, BreadthError> {
        let interval = self.data.interval()?;
        Ok(self.analysis.to_config(interval))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "market-breadth".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Where price history comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Yahoo,
    Csv,
}

/// Market data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub provider: Provider,
    pub base_url: String,
    /// Panel file or per-symbol directory for the csv provider
    pub csv_path: Option<String>,
    pub lookback: String,
    pub interval: String,
    /// Maximum requests in flight
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Unset disables on-disk caching
    pub cache_dir: Option<String>,
    pub cache_max_age_hours: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            provider: Provider::Yahoo,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            csv_path: None,
            lookback: "1y".to_string(),
            interval: "1d".to_string(),
            concurrency: 8,
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (compatible; market-breadth/0.1)".to_string(),
            cache_dir: Some(".cache/prices".to_string()),
            cache_max_age_hours: 12,
        }
    }
}

impl DataSettings {
    pub fn interval(&self) -> Result<Interval, BreadthError> {
        Ok(self.interval.parse()?)
    }

    pub fn lookback(&self) -> Result<Lookback, BreadthError> {
        Ok(self.lookback.parse()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(PathBuf::from)
    }

    /// Zero hours means entries never expire.
    pub fn cache_max_age(&self) -> Option<Duration> {
        (self.cache_max_age_hours > 0).then(|| Duration::from_secs(self.cache_max_age_hours * 3600))
    }
}

/// Analysed symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseSettings {
    pub tickers: Vec<String>,
    pub benchmark: String,
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
            benchmark: "SPY".to_string(),
        }
    }
}

impl UniverseSettings {
    /// Constituents followed by the benchmark.
    pub fn all_symbols(&self) -> Vec<String> {
        let mut symbols = self.tickers.clone();
        symbols.push(self.benchmark.clone());
        symbols
    }
}

/// Metric and screening parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub sma_window: usize,
    pub candidate_min_distance: f64,
    pub candidate_max_volatility: f64,
    pub candidate_limit: usize,
    pub outlier_distance: f64,
    pub outlier_beta: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let defaults = AnalysisConfig::default();
        Self {
            sma_window: defaults.sma_window,
            candidate_min_distance: defaults.candidate_min_distance,
            candidate_max_volatility: defaults.candidate_max_volatility,
            candidate_limit: defaults.candidate_limit,
            outlier_distance: defaults.outlier_distance,
            outlier_beta: defaults.outlier_beta,
        }
    }
}

impl AnalysisSettings {
    pub fn to_config(&self, interval: Interval) -> AnalysisConfig {
        AnalysisConfig {
            sma_window: self.sma_window,
            periods_per_year: interval.periods_per_year(),
            candidate_min_distance: self.candidate_min_distance,
            candidate_max_volatility: self.candidate_max_volatility,
            candidate_limit: self.candidate_limit,
            outlier_distance: self.outlier_distance,
            outlier_beta: self.outlier_beta,
        }
    }
}

/// Chart output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub enabled: bool,
    pub output_dir: String,
    pub format: ChartFormat,
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: "charts".to_string(),
            format: ChartFormat::Svg,
            width: 1600,
            height: 1000,
            theme: Theme::Dark,
        }
    }
}
