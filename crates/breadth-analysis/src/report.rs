//! Breadth report generation.

use chrono::{DateTime, Utc};
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::path::Path;

use breadth_core::error::BreadthError;

use crate::screen;
use crate::{AnalysisConfig, AssetMetrics, BreadthSummary, MetricsSet};

/// Complete breadth report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreadthReport {
    pub generated_at: DateTime<Utc>,
    pub benchmark: String,
    /// Configuration used
    pub config: AnalysisConfig,
    pub summary: BreadthSummary,
    pub metrics: MetricsSet,
    /// Strong trend / low volatility names
    pub candidates: Vec<AssetMetrics>,
}

impl BreadthReport {
    /// Build a report from computed metrics.
    pub fn new(benchmark: impl Into<String>, config: AnalysisConfig, metrics: MetricsSet) -> Self {
        let summary = BreadthSummary::from_metrics(&metrics.assets);
        let candidates = screen::candidates(&metrics.assets, &config)
            .into_iter()
            .cloned()
            .collect();

        Self {
            generated_at: Utc::now(),
            benchmark: benchmark.into(),
            config,
            summary,
            metrics,
            candidates,
        }
    }

    /// Assets to annotate on charts.
    pub fn outliers(&self) -> Vec<&AssetMetrics> {
        screen::outliers(&self.metrics.assets, &self.config)
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                  MARKET BREADTH REPORT                     \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("UNIVERSE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Benchmark:           {}\n", self.benchmark));
        s.push_str(&format!("  Constituents:        {}\n", self.summary.total));
        if let (Some(start), Some(end)) = (self.metrics.start, self.metrics.end) {
            s.push_str(&format!("  Period:              {} to {}\n", start, end));
        }
        s.push_str(&format!(
            "  Observations:        {}\n",
            self.metrics.observations
        ));
        s.push_str(&format!(
            "  SMA Window:          {}\n",
            self.config.sma_window
        ));
        s.push('\n');

        s.push_str("BREADTH\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Bullish:             {} ({:.1}%)\n",
            self.summary.bullish, self.summary.bullish_pct
        ));
        s.push_str(&format!(
            "  Bearish:             {} ({:.1}%)\n",
            self.summary.bearish,
            self.summary.bearish_pct()
        ));
        s.push_str(&format!("  Market Regime:       {}\n", self.summary.regime));
        if let Some(median) = self.summary.median_distance {
            s.push_str(&format!("  Median Distance:     {:+.2}%\n", median));
        }
        if let Some(beta) = self.summary.mean_beta {
            s.push_str(&format!("  Mean Beta:           {:.2}\n", beta));
        }
        s.push('\n');

        s.push_str("STRONG TREND / LOW VOLATILITY CANDIDATES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        if self.candidates.is_empty() {
            s.push_str("  (none)\n");
        } else {
            s.push_str("  Ticker    Distance_SMA   Volatility       Beta\n");
            for a in &self.candidates {
                s.push_str(&format!(
                    "  {:<8} {:>12.2}% {:>11.2}% {:>10.2}\n",
                    a.ticker, a.distance_sma, a.volatility, a.beta
                ));
            }
        }

        if !self.metrics.dropped.is_empty() || !self.metrics.skipped.is_empty() {
            s.push('\n');
            s.push_str("EXCLUDED\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for ticker in &self.metrics.dropped {
                s.push_str(&format!("  {:<8} incomplete history\n", ticker));
            }
            for skipped in &self.metrics.skipped {
                s.push_str(&format!("  {:<8} {}\n", skipped.ticker, skipped.reason));
            }
        }

        s.push_str("\n═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, BreadthError> {
        serde_json::to_string_pretty(self).map_err(|e| BreadthError::Serialization(e.to_string()))
    }

    /// Write per-asset metrics as CSV.
    pub fn write_csv(&self, path: &Path) -> Result<(), BreadthError> {
        let ser = |e: csv::Error| BreadthError::Serialization(e.to_string());

        let mut writer = Writer::from_path(path).map_err(ser)?;
        writer
            .write_record(["Ticker", "Distance_SMA", "Volatility", "Beta", "Regime"])
            .map_err(ser)?;
        for a in &self.metrics.assets {
            writer
                .write_record([
                    a.ticker.clone(),
                    format!("{:.4}", a.distance_sma),
                    format!("{:.4}", a.volatility),
                    format!("{:.4}", a.beta),
                    a.regime.to_string(),
                ])
                .map_err(ser)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> BreadthReport {
        let metrics = MetricsSet {
            assets: vec![
                AssetMetrics::new("AAPL", 6.5, 22.0, 1.1),
                AssetMetrics::new("TSLA", -16.0, 60.0, 2.1),
                AssetMetrics::new("KO", 3.0, 14.0, 0.6),
            ],
            dropped: vec!["BRK-B".to_string()],
            observations: 251,
            ..MetricsSet::default()
        };
        BreadthReport::new("SPY", AnalysisConfig::default(), metrics)
    }

    #[test]
    fn test_report_contents() {
        let report = report();

        assert_eq!(report.summary.bullish, 2);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].ticker, "AAPL");

        let outliers: Vec<&str> = report.outliers().iter().map(|a| a.ticker.as_str()).collect();
        assert_eq!(outliers, vec!["TSLA"]);
    }

    #[test]
    fn test_summary_text() {
        let text = report().summary();

        assert!(text.contains("MARKET BREADTH REPORT"));
        assert!(text.contains("Bullish:             2 (66.7%)"));
        assert!(text.contains("Market Regime:       Bull"));
        assert!(text.contains("AAPL"));
        assert!(text.contains("BRK-B    incomplete history"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = report();
        let json = report.to_json().unwrap();
        let parsed: BreadthReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.benchmark, "SPY");
        assert_eq!(parsed.metrics.assets, report.metrics.assets);
        assert!(json.contains("\"regime\": \"bull\""));
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.csv");
        report().write_csv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Ticker,Distance_SMA,Volatility,Beta,Regime");
        assert_eq!(lines[1], "AAPL,6.5000,22.0000,1.1000,Bullish");
        assert_eq!(lines.len(), 4);
    }
}
