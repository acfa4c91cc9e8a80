//! Breadth, trend and risk metrics for an equity universe.
//!
//! Turns an aligned price panel into per-constituent metrics (distance from
//! SMA, annualized volatility, beta), aggregates them into a market-breadth
//! summary and screens for notable names.

mod config;
mod metrics;
mod report;
pub mod screen;
mod summary;

pub use config::AnalysisConfig;
pub use metrics::{compute_metrics, AssetMetrics, MetricsSet, SkippedAsset};
pub use report::BreadthReport;
pub use summary::{BreadthSummary, MarketRegime};
