//! 3D risk scatter of beta, volatility and trend distance.

use breadth_analysis::MetricsSet;
use breadth_core::error::ChartError;
use breadth_core::types::Regime;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use crate::render::{font, padded_range, render, DrawResult, Figure};
use crate::{ChartOptions, Palette};

struct Scatter3d<'a> {
    metrics: &'a MetricsSet,
}

impl Figure for Scatter3d<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, p: &Palette) -> DrawResult<DB> {
        let assets = &self.metrics.assets;
        let (x_lo, x_hi) = padded_range(assets.iter().map(|a| a.beta), 0.08);
        let (y_lo, y_hi) = padded_range(assets.iter().map(|a| a.distance_sma).chain([0.0]), 0.08);
        let (z_lo, z_hi) = padded_range(assets.iter().map(|a| a.volatility), 0.08);

        let mut chart = ChartBuilder::on(root)
            .caption("Risk Surface: Beta, Trend and Volatility", font(26, &p.text))
            .margin(30)
            .build_cartesian_3d(x_lo..x_hi, y_lo..y_hi, z_lo..z_hi)?;

        chart.with_projection(|mut pb| {
            pb.pitch = 0.45;
            pb.yaw = 0.65;
            pb.scale = 0.85;
            pb.into_matrix()
        });

        chart
            .configure_axes()
            .light_grid_style(&p.grid.mix(0.15))
            .bold_grid_style(&p.grid.mix(0.35))
            .label_style(font(12, &p.text))
            .max_light_lines(3)
            .draw()?;

        // Drop lines to the floor make depth readable
        chart.draw_series(assets.iter().map(|a| {
            PathElement::new(
                vec![
                    (a.beta, y_lo, a.volatility),
                    (a.beta, a.distance_sma, a.volatility),
                ],
                p.grid.mix(0.4).stroke_width(1),
            )
        }))?;

        for (regime, label) in [(Regime::Bullish, "Bullish"), (Regime::Bearish, "Bearish")] {
            let color = p.regime(regime);
            chart
                .draw_series(
                    assets
                        .iter()
                        .filter(|a| a.regime == regime)
                        .map(|a| Circle::new((a.beta, a.distance_sma, a.volatility), 5, color.filled())),
                )?
                .label(label)
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(&p.background.mix(0.8))
            .border_style(&p.grid)
            .label_font(font(14, &p.text))
            .draw()?;

        let (w, h) = root.dim_in_pixel();
        root.draw_text(
            "x: Beta   y: % Distance from SMA   z: Annualized Volatility %",
            &font(14, &p.text).pos(Pos::new(HPos::Center, VPos::Bottom)),
            (w as i32 / 2, h as i32 - 8),
        )?;

        Ok(())
    }
}

/// Render the 3D scatter of every constituent, coloured by regime.
pub fn render_scatter_3d(metrics: &MetricsSet, path: &Path, options: &ChartOptions) -> Result<(), ChartError> {
    if metrics.is_empty() {
        return Err(ChartError::EmptyInput("no constituent metrics to plot".to_string()));
    }
    render(&Scatter3d { metrics }, path, options)
}
