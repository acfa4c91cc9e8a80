//! Analysis parameters.

use serde::{Deserialize, Serialize};

/// Parameters of the metric pipeline and screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Trailing window of the trend SMA
    pub sma_window: usize,
    /// Periods per year used to annualize volatility
    pub periods_per_year: f64,
    /// Candidates need a distance from SMA above this (percent)
    pub candidate_min_distance: f64,
    /// Candidates need a volatility below this (percent)
    pub candidate_max_volatility: f64,
    /// Maximum number of candidates reported
    pub candidate_limit: usize,
    /// Annotate names whose absolute distance exceeds this (percent)
    pub outlier_distance: f64,
    /// Annotate names whose beta exceeds this
    pub outlier_beta: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_window: 50,
            periods_per_year: 252.0,
            candidate_min_distance: 5.0,
            candidate_max_volatility: 25.0,
            candidate_limit: 5,
            outlier_distance: 15.0,
            outlier_beta: 1.5,
        }
    }
}
