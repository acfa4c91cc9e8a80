//! Per-constituent trend and risk metrics.

use breadth_core::error::{BreadthError, DataError, IndicatorError};
use breadth_core::traits::Statistic;
use breadth_core::types::{PriceTable, Regime};
use breadth_indicators::{pct_change, AnnualizedVolatility, Beta, TrendDistance};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::AnalysisConfig;

/// Metrics for a single constituent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetrics {
    pub ticker: String,
    /// Percent distance of the last close from its SMA
    pub distance_sma: f64,
    /// Annualized volatility in percent
    pub volatility: f64,
    /// Beta against the benchmark
    pub beta: f64,
    pub regime: Regime,
}

impl AssetMetrics {
    pub fn new(ticker: impl Into<String>, distance_sma: f64, volatility: f64, beta: f64) -> Self {
        Self {
            ticker: ticker.into(),
            distance_sma,
            volatility,
            beta,
            regime: Regime::from_distance(distance_sma),
        }
    }
}

/// A constituent whose metrics could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedAsset {
    pub ticker: String,
    pub reason: String,
}

/// Metrics for the whole universe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSet {
    /// Constituent metrics in universe order
    pub assets: Vec<AssetMetrics>,
    /// Constituents with too little usable history
    pub skipped: Vec<SkippedAsset>,
    /// Symbols removed because their history had gaps
    pub dropped: Vec<String>,
    /// Rows of the aligned panel
    pub observations: usize,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl MetricsSet {
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, ticker: &str) -> Option<&AssetMetrics> {
        self.assets.iter().find(|a| a.ticker == ticker)
    }
}

fn check_config(config: &AnalysisConfig) -> Result<(), IndicatorError> {
    if config.sma_window == 0 {
        return Err(IndicatorError::InvalidParameter(
            "SMA window must be greater than 0".to_string(),
        ));
    }
    if !(config.periods_per_year > 0.0) {
        return Err(IndicatorError::InvalidParameter(format!(
            "periods per year must be positive, got {}",
            config.periods_per_year
        )));
    }
    Ok(())
}

/// Compute metrics for every constituent of `table` against `benchmark`.
///
/// Columns with any gap are dropped first, so every remaining series shares
/// the same dates. The benchmark must survive that step.
pub fn compute_metrics(
    mut table: PriceTable,
    benchmark: &str,
    config: &AnalysisConfig,
) -> Result<MetricsSet, BreadthError> {
    check_config(config)?;

    let dropped = table.drop_incomplete();
    if !dropped.is_empty() {
        warn!(symbols = ?dropped, "Dropping symbols with incomplete history");
    }

    let benchmark_closes = table
        .split_benchmark(benchmark)
        .map_err(|_| DataError::MissingBenchmark(benchmark.to_string()))?;
    let benchmark_returns = pct_change(&benchmark_closes);

    let trend = TrendDistance::new(config.sma_window);
    let volatility = AnnualizedVolatility::new(config.periods_per_year);

    let mut set = MetricsSet {
        dropped,
        observations: table.len(),
        start: table.dates().first().copied(),
        end: table.dates().last().copied(),
        ..MetricsSet::default()
    };

    for (ticker, closes) in table.iter_columns() {
        let returns = pct_change(closes);

        let result = trend.compute(closes).and_then(|distance| {
            let vol = volatility.compute(&returns)?;
            let beta = Beta::compute(&returns, &benchmark_returns)?;
            Ok((distance, vol, beta))
        });

        match result {
            Ok((distance, vol, beta)) => {
                debug!(ticker, distance, vol, beta, "Metrics computed");
                set.assets.push(AssetMetrics::new(ticker, distance, vol, beta));
            }
            Err(e) => {
                warn!(ticker, error = %e, "Skipping constituent");
                set.skipped.push(SkippedAsset {
                    ticker: ticker.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        assets = set.assets.len(),
        skipped = set.skipped.len(),
        dropped = set.dropped.len(),
        observations = set.observations,
        "Universe metrics computed"
    );

    Ok(set)
}
