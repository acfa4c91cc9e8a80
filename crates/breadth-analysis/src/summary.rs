//! Market breadth aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::AssetMetrics;

/// Overall market regime derived from breadth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRegime {
    /// At least 70% of constituents above their SMA
    StrongBull,
    /// More than half above
    Bull,
    /// Half or fewer above
    Bear,
    /// 30% or fewer above
    StrongBear,
}

impl MarketRegime {
    pub fn from_bullish_pct(pct: f64) -> Self {
        if pct >= 70.0 {
            MarketRegime::StrongBull
        } else if pct > 50.0 {
            MarketRegime::Bull
        } else if pct > 30.0 {
            MarketRegime::Bear
        } else {
            MarketRegime::StrongBear
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketRegime::StrongBull => "Strong Bull",
            MarketRegime::Bull => "Bull",
            MarketRegime::Bear => "Bear",
            MarketRegime::StrongBear => "Strong Bear",
        };
        write!(f, "{}", s)
    }
}

/// Participation of the universe in the prevailing trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadthSummary {
    pub bullish: usize,
    pub bearish: usize,
    pub total: usize,
    /// Share of bullish constituents in percent, 0 for an empty universe
    pub bullish_pct: f64,
    pub regime: MarketRegime,
    /// Median distance from SMA across the universe
    pub median_distance: Option<f64>,
    /// Mean beta across the universe
    pub mean_beta: Option<f64>,
}

impl BreadthSummary {
    pub fn from_metrics(assets: &[AssetMetrics]) -> Self {
        let total = assets.len();
        let bullish = assets.iter().filter(|a| a.regime.is_bullish()).count();
        let bearish = total - bullish;

        let bullish_pct = if total == 0 {
            0.0
        } else {
            bullish as f64 / total as f64 * 100.0
        };

        let mut distances: Vec<f64> = assets.iter().map(|a| a.distance_sma).collect();
        distances.sort_by(|a, b| a.total_cmp(b));
        let median_distance = match distances.len() {
            0 => None,
            n if n % 2 == 1 => Some(distances[n / 2]),
            n => Some((distances[n / 2 - 1] + distances[n / 2]) / 2.0),
        };

        let mean_beta = (total > 0).then(|| assets.iter().map(|a| a.beta).sum::<f64>() / total as f64);

        Self {
            bullish,
            bearish,
            total,
            bullish_pct,
            regime: MarketRegime::from_bullish_pct(bullish_pct),
            median_distance,
            mean_beta,
        }
    }

    pub fn bearish_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 - self.bullish_pct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(ticker: &str, distance: f64, beta: f64) -> AssetMetrics {
        AssetMetrics::new(ticker, distance, 20.0, beta)
    }

    #[test]
    fn test_counts() {
        let assets = vec![
            asset("A", 4.0, 1.0),
            asset("B", -2.0, 1.2),
            asset("C", 0.0, 0.8),
            asset("D", 10.0, 1.0),
        ];
        let summary = BreadthSummary::from_metrics(&assets);

        assert_eq!(summary.bullish, 2);
        assert_eq!(summary.bearish, 2); // zero distance counts as bearish
        assert_eq!(summary.total, 4);
        assert!((summary.bullish_pct - 50.0).abs() < 1e-12);
        assert!((summary.bearish_pct() - 50.0).abs() < 1e-12);
        assert_eq!(summary.regime, MarketRegime::Bear);
        assert_eq!(summary.median_distance, Some(2.0));
        assert!((summary.mean_beta.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_universe() {
        let summary = BreadthSummary::from_metrics(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.bullish_pct, 0.0);
        assert_eq!(summary.bearish_pct(), 0.0);
        assert_eq!(summary.regime, MarketRegime::StrongBear);
        assert!(summary.median_distance.is_none());
        assert!(summary.mean_beta.is_none());
    }

    #[test]
    fn test_regime_thresholds() {
        assert_eq!(MarketRegime::from_bullish_pct(70.0), MarketRegime::StrongBull);
        assert_eq!(MarketRegime::from_bullish_pct(50.1), MarketRegime::Bull);
        assert_eq!(MarketRegime::from_bullish_pct(50.0), MarketRegime::Bear);
        assert_eq!(MarketRegime::from_bullish_pct(30.0), MarketRegime::StrongBear);
        assert_eq!(MarketRegime::StrongBull.to_string(), "Strong Bull");
    }
}
