//! Three-panel breadth dashboard: regime donut, trend-strength histogram and risk map.

use breadth_analysis::{AssetMetrics, BreadthReport, BreadthSummary};
use breadth_core::error::ChartError;
use breadth_indicators::gaussian_kde;
use breadth_indicators::kde::linspace;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;
use std::path::Path;

use crate::render::{annular_sector, font, padded_range, polar, render, DrawResult, Figure};
use crate::{ChartOptions, Palette};

const HIST_BINS: usize = 20;
const KDE_POINTS: usize = 200;

type Chart2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// One histogram bucket `[lo, hi)`; the last bucket is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Equal-width histogram over the range of the finite values.
///
/// A zero-width range is widened to `[v - 0.5, v + 0.5]`.
pub(crate) fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return vec![];
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lo: min + width * i as f64,
            hi: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Marker radius in pixels for an annualized volatility in percent.
pub(crate) fn bubble_radius(volatility: f64) -> i32 {
    (0.7 * (volatility.max(0.0) * 10.0).sqrt()).clamp(2.0, 40.0).round() as i32
}

struct Dashboard<'a> {
    report: &'a BreadthReport,
}

impl Figure for Dashboard<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, p: &Palette) -> DrawResult<DB> {
        let root = root.titled("Market Breadth & Risk Map", font(30, &p.text))?;
        let (_, h) = root.dim_in_pixel();
        let (top, bottom) = root.split_vertically(h * 45 / 100);
        let panels = top.split_evenly((1, 2));

        draw_donut(&panels[0], &self.report.summary, p)?;
        draw_histogram(
            &panels[1],
            &self.report.metrics.assets,
            self.report.config.sma_window,
            p,
        )?;
        draw_risk_map(&bottom, self.report, p)
    }
}

fn draw_mesh<DB: DrawingBackend>(
    chart: &mut Chart2d<'_, DB>,
    p: &Palette,
    x_desc: &str,
    y_desc: &str,
) -> DrawResult<DB> {
    chart
        .configure_mesh()
        .axis_style(&p.grid)
        .bold_line_style(&p.grid.mix(0.3))
        .light_line_style(&p.grid.mix(0.1))
        .label_style(font(12, &p.text))
        .axis_desc_style(font(14, &p.text))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()
}

fn draw_donut<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    summary: &BreadthSummary,
    p: &Palette,
) -> DrawResult<DB> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let centered = Pos::new(HPos::Center, VPos::Center);

    area.draw_text(
        "Market Regime (Breadth)",
        &font(20, &p.text).pos(Pos::new(HPos::Center, VPos::Top)),
        (w / 2, 8),
    )?;

    let center = (w / 2, h / 2 + 14);
    let outer = w.min(h) as f64 * 0.34;
    let inner = outer * 0.70;
    let total = summary.total.max(1) as f64;

    let slices = [
        (summary.bullish, p.bullish, "Bullish (Above SMA)"),
        (summary.bearish, p.bearish, "Bearish (Below SMA)"),
    ];

    // Counter-clockwise from twelve o'clock
    let mut start = PI / 2.0;
    for (count, color, label) in slices {
        if count == 0 {
            continue;
        }
        let sweep = 2.0 * PI * count as f64 / total;
        let mid = start + sweep / 2.0;

        area.draw(&Polygon::new(
            annular_sector(center, outer, inner, start, start + sweep),
            color.filled(),
        ))?;
        area.draw_text(
            &format!("{:.1}%", count as f64 / total * 100.0),
            &font(14, &p.background).pos(centered),
            polar(center, (outer + inner) / 2.0, mid),
        )?;
        area.draw_text(label, &font(14, &p.text).pos(centered), polar(center, outer + 28.0, mid))?;

        start += sweep;
    }

    area.draw_text(
        &summary.regime.to_string(),
        &font(18, &p.text).pos(centered),
        center,
    )?;

    Ok(())
}

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    assets: &[AssetMetrics],
    sma_window: usize,
    p: &Palette,
) -> DrawResult<DB> {
    let distances: Vec<f64> = assets.iter().map(|a| a.distance_sma).collect();
    let bins = histogram(&distances, HIST_BINS);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Ok(());
    };

    // Keep the zero marker in view
    let (x_lo, x_hi) = (first.lo.min(0.0), last.hi.max(0.0));
    let bin_width = first.hi - first.lo;

    let grid = linspace(x_lo, x_hi, KDE_POINTS);
    let scale = distances.len() as f64 * bin_width;
    let kde: Vec<(f64, f64)> = grid
        .iter()
        .copied()
        .zip(gaussian_kde(&distances, &grid))
        .map(|(x, d)| (x, d * scale))
        .collect();

    let peak = bins
        .iter()
        .map(|b| b.count as f64)
        .chain(kde.iter().map(|&(_, y)| y))
        .fold(1.0, f64::max);
    let y_hi = peak * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption("Trend Strength Distribution", font(20, &p.text))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(45)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;

    draw_mesh(
        &mut chart,
        p,
        &format!("% Distance from {} SMA", sma_window),
        "Count",
    )?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lo, 0.0), (b.hi, b.count as f64)], p.series.mix(0.55).filled())
    }))?;
    chart.draw_series(LineSeries::new(kde, p.series.stroke_width(2)))?;
    chart.draw_series(LineSeries::new(
        vec![(0.0, 0.0), (0.0, y_hi)],
        p.text.mix(0.8).stroke_width(1),
    ))?;

    Ok(())
}

fn draw_risk_map<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    report: &BreadthReport,
    p: &Palette,
) -> DrawResult<DB> {
    let assets = &report.metrics.assets;
    let (x_lo, x_hi) = padded_range(assets.iter().map(|a| a.beta).chain([1.0]), 0.08);
    let (y_lo, y_hi) = padded_range(assets.iter().map(|a| a.distance_sma).chain([0.0]), 0.12);

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Risk Map: Beta vs. Trend Strength (Size = Volatility)",
            font(20, &p.text),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    draw_mesh(
        &mut chart,
        p,
        "Beta (Market Sensitivity)",
        "% Distance from SMA (Trend)",
    )?;

    // Reference lines: on the SMA, and moving with the benchmark
    let reference = p.text.mix(0.5).stroke_width(1);
    chart.draw_series(LineSeries::new(vec![(x_lo, 0.0), (x_hi, 0.0)], reference))?;
    chart.draw_series(LineSeries::new(vec![(1.0, y_lo), (1.0, y_hi)], reference))?;

    chart.draw_series(assets.iter().map(|a| {
        Circle::new(
            (a.beta, a.distance_sma),
            bubble_radius(a.volatility),
            p.regime(a.regime).mix(0.7).filled(),
        )
    }))?;
    chart.draw_series(assets.iter().map(|a| {
        Circle::new(
            (a.beta, a.distance_sma),
            bubble_radius(a.volatility),
            p.text.mix(0.6).stroke_width(1),
        )
    }))?;

    chart.draw_series(report.outliers().into_iter().map(|a| {
        let offset = bubble_radius(a.volatility) + 2;
        EmptyElement::at((a.beta, a.distance_sma))
            + Text::new(a.ticker.clone(), (offset, -offset), font(12, &p.highlight))
    }))?;

    Ok(())
}

/// Render the breadth donut, trend histogram and risk map to one image.
pub fn render_dashboard(report: &BreadthReport, path: &Path, options: &ChartOptions) -> Result<(), ChartError> {
    if report.metrics.is_empty() {
        return Err(ChartError::EmptyInput("report has no constituent metrics".to_string()));
    }
    render(&Dashboard { report }, path, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use breadth_analysis::{AnalysisConfig, MetricsSet};

    #[test]
    fn test_histogram_bins() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, f64::NAN];
        let bins = histogram(&values, 4);

        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].lo, 0.0);
        assert_eq!(bins[3].hi, 4.0);
        // Max value lands in the closed last bin
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_histogram_degenerate() {
        let bins = histogram(&[2.0, 2.0], 20);
        assert_eq!(bins.len(), 20);
        assert!((bins[0].lo - 1.5).abs() < 1e-12);
        assert!((bins[19].hi - 2.5).abs() < 1e-12);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);

        assert!(histogram(&[], 20).is_empty());
        assert!(histogram(&[f64::NAN], 20).is_empty());
    }

    #[test]
    fn test_bubble_radius() {
        assert!(bubble_radius(60.0) > bubble_radius(15.0));
        assert_eq!(bubble_radius(0.0), 2);
        assert_eq!(bubble_radius(f64::NAN), 2);
        assert_eq!(bubble_radius(1.0e6), 40);
    }

    fn report(assets: Vec<AssetMetrics>) -> BreadthReport {
        let metrics = MetricsSet {
            assets,
            ..MetricsSet::default()
        };
        BreadthReport::new("SPY", AnalysisConfig::default(), metrics)
    }

    #[test]
    fn test_render_svg() {
        let report = report(vec![
            AssetMetrics::new("NVDA", 22.0, 50.0, 1.8),
            AssetMetrics::new("KO", 2.0, 14.0, 0.6),
            AssetMetrics::new("INTC", -19.0, 40.0, 1.2),
            AssetMetrics::new("JPM", -1.5, 21.0, 1.0),
        ]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.svg");
        render_dashboard(&report, &path, &ChartOptions::default()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Market Regime (Breadth)"));
        assert!(svg.contains("Trend Strength Distribution"));
        assert!(svg.contains("Risk Map"));
        // Outliers are annotated, the rest are not
        assert!(svg.contains("NVDA"));
        assert!(svg.contains("INTC"));
        assert!(!svg.contains(">KO<"));
    }

    #[test]
    fn test_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let result = render_dashboard(&report(vec![]), &dir.path().join("d.svg"), &ChartOptions::default());
        assert!(matches!(result, Err(ChartError::EmptyInput(_))));
    }
}
