//! Screens over universe metrics.

use crate::{AnalysisConfig, AssetMetrics};

/// Strong trend / low volatility names.
///
/// Keeps assets trading more than `candidate_min_distance` percent above
/// their SMA with volatility under `candidate_max_volatility`, strongest trend
/// first, at most `candidate_limit` of them.
pub fn candidates<'a>(assets: &'a [AssetMetrics], config: &AnalysisConfig) -> Vec<&'a AssetMetrics> {
    let mut picks: Vec<&AssetMetrics> = assets
        .iter()
        .filter(|a| {
            a.distance_sma > config.candidate_min_distance
                && a.volatility < config.candidate_max_volatility
        })
        .collect();

    picks.sort_by(|a, b| b.distance_sma.total_cmp(&a.distance_sma));
    picks.truncate(config.candidate_limit);
    picks
}

/// Names worth labelling on the risk map: extreme trend or high beta.
pub fn outliers<'a>(assets: &'a [AssetMetrics], config: &AnalysisConfig) -> Vec<&'a AssetMetrics> {
    assets
        .iter()
        .filter(|a| is_outlier(a, config))
        .collect()
}

pub fn is_outlier(asset: &AssetMetrics, config: &AnalysisConfig) -> bool {
    asset.distance_sma.abs() > config.outlier_distance || asset.beta > config.outlier_beta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(ticker: &str, distance: f64, volatility: f64, beta: f64) -> AssetMetrics {
        AssetMetrics::new(ticker, distance, volatility, beta)
    }

    fn tickers(picks: &[&AssetMetrics]) -> Vec<String> {
        picks.iter().map(|a| a.ticker.clone()).collect()
    }

    #[test]
    fn test_candidates_filter_and_order() {
        let assets = vec![
            asset("KO", 6.0, 14.0, 0.6),
            asset("NVDA", 20.0, 48.0, 1.9), // too volatile
            asset("PG", 9.5, 16.0, 0.5),
            asset("XOM", 5.0, 20.0, 0.9),   // not above threshold
            asset("JNJ", 7.2, 24.9, 0.55),
        ];

        let picks = candidates(&assets, &AnalysisConfig::default());
        assert_eq!(tickers(&picks), vec!["PG", "JNJ", "KO"]);
    }

    #[test]
    fn test_candidates_limit() {
        let assets: Vec<AssetMetrics> = (0..10)
            .map(|i| asset(&format!("T{}", i), 6.0 + i as f64, 10.0, 1.0))
            .collect();

        let picks = candidates(&assets, &AnalysisConfig::default());
        assert_eq!(picks.len(), 5);
        assert_eq!(picks[0].ticker, "T9");
        assert_eq!(picks[4].ticker, "T5");
    }

    #[test]
    fn test_outliers() {
        let assets = vec![
            asset("TSLA", -18.0, 55.0, 1.2),
            asset("AMD", 4.0, 45.0, 1.7),
            asset("PEP", 2.0, 15.0, 0.5),
            asset("LLY", 15.0, 30.0, 0.4), // boundary is exclusive
        ];

        let labelled = outliers(&assets, &AnalysisConfig::default());
        assert_eq!(tickers(&labelled), vec!["TSLA", "AMD"]);
    }
}
