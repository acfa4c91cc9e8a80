//! Analyze command implementation.

use anyhow::{Context, Result};
use breadth_analysis::{compute_metrics, BreadthReport};
use breadth_config::{AppConfig, ChartSettings};
use breadth_monitor::{render_dashboard, render_gauge, render_scatter_3d, ChartOptions};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::pipeline::acquire;
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, mut config: AppConfig) -> Result<()> {
    args.data.apply(&mut config);
    if let Some(dir) = &args.output_dir {
        config.charts.output_dir = dir.display().to_string();
    }
    if args.no_charts {
        config.charts.enabled = false;
    }
    config.validate()?;

    let analysis = config.analysis_config()?;
    let benchmark = config.universe.benchmark.clone();
    info!(
        constituents = config.universe.tickers.len(),
        benchmark = %benchmark,
        sma_window = analysis.sma_window,
        "Starting analysis"
    );

    if let Some(days) = config.data.lookback()?.approx_days() {
        let bars = f64::from(days) / 365.0 * analysis.periods_per_year;
        if bars < analysis.sma_window as f64 {
            warn!(
                lookback = %config.data.lookback,
                sma_window = analysis.sma_window,
                "Lookback is shorter than the SMA window, constituents will be skipped"
            );
        }
    }

    let outcome = acquire(&config, args.data.refresh).await?;
    let metrics = compute_metrics(outcome.table, &benchmark, &analysis)
        .context("Failed to compute universe metrics")?;
    let report = BreadthReport::new(benchmark, analysis, metrics);

    // Output results
    match args.format {
        OutputFormat::Json => {
            println!("{}", report.to_json()?);
        }
        OutputFormat::Text => {
            println!("{}", report.summary());
            if !outcome.failed.is_empty() {
                let failed: Vec<&str> = outcome.failed.iter().map(|(s, _)| s.as_str()).collect();
                println!("Failed to fetch: {}", failed.join(", "));
            }
        }
    }

    if config.charts.enabled {
        for path in render_charts(&report, &config.charts)? {
            info!("Chart saved to {:?}", path);
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        save_report(&report, save_path)?;
        info!("Report saved to {:?}", save_path);
    }

    Ok(())
}

fn render_charts(report: &BreadthReport, charts: &ChartSettings) -> Result<Vec<PathBuf>> {
    let dir = PathBuf::from(&charts.output_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Cannot create chart directory {:?}", dir))?;

    let options = ChartOptions {
        width: charts.width,
        height: charts.height,
        theme: charts.theme,
    };
    let ext = charts.format.extension();
    let gauge = dir.join(format!("breadth_gauge.{}", ext));
    let dashboard = dir.join(format!("breadth_dashboard.{}", ext));
    let scatter = dir.join(format!("risk_scatter_3d.{}", ext));

    render_gauge(&report.summary, &gauge, &options).context("Failed to render gauge")?;
    render_dashboard(report, &dashboard, &options).context("Failed to render dashboard")?;
    render_scatter_3d(&report.metrics, &scatter, &options).context("Failed to render 3D scatter")?;

    Ok(vec![gauge, dashboard, scatter])
}

fn save_report(report: &BreadthReport, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => report.write_csv(path)?,
        Some("json") => std::fs::write(path, report.to_json()?)?,
        _ => anyhow::bail!("Cannot save report to {:?}: use a .json or .csv file", path),
    }
    Ok(())
}
