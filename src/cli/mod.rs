//! CLI definitions.

pub mod commands;

use breadth_config::AppConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "breadth")]
#[command(author, version, about = "Market breadth and risk map for a large-cap equity universe")]
pub struct Cli {
    /// Configuration file path (defaults to config/default.toml when present)
    #[arg(short, long, env = "BREADTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (overrides logging.level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// How the analyze report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute breadth and risk metrics, print the report and render charts
    Analyze(AnalyzeArgs),
    /// Download the aligned price panel to CSV
    Fetch(FetchArgs),
    /// List the configured universe
    Universe,
    /// Validate configuration
    ValidateConfig,
}

/// Options selecting which prices are analysed.
#[derive(clap::Args)]
pub struct DataArgs {
    /// Constituents (comma-separated), replacing the configured universe
    #[arg(short, long, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Benchmark symbol
    #[arg(short, long)]
    pub benchmark: Option<String>,

    /// History to download (1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)
    #[arg(long)]
    pub lookback: Option<String>,

    /// Bar interval (1d, 1wk, 1mo)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Read closes from a CSV panel or a directory of per-symbol CSV files
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Ignore cached prices
    #[arg(long)]
    pub refresh: bool,
}

impl DataArgs {
    /// Overlay command-line choices on the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if !self.tickers.is_empty() {
            config.universe.tickers = self.tickers.iter().map(|t| t.trim().to_uppercase()).collect();
        }
        if let Some(benchmark) = &self.benchmark {
            config.universe.benchmark = benchmark.trim().to_uppercase();
        }
        if let Some(lookback) = &self.lookback {
            config.data.lookback = lookback.clone();
        }
        if let Some(interval) = &self.interval {
            config.data.interval = interval.clone();
        }
        if let Some(data) = &self.data {
            config.data.provider = breadth_config::Provider::Csv;
            config.data.csv_path = Some(data.display().to_string());
        }
    }
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Directory for rendered charts
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Save the report to file (.json or .csv)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,
}

#[derive(clap::Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output CSV file
    #[arg(short = 'O', long)]
    pub out: PathBuf,
}
