//! Breadth gauge.

use breadth_analysis::BreadthSummary;
use breadth_core::error::ChartError;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;
use std::path::Path;

use crate::render::{annular_sector, font, polar, render, DrawResult, Figure};
use crate::{ChartOptions, Palette};

/// Band edges of the gauge in percent bullish.
const BEARISH_BAND: f64 = 30.0;
const BULLISH_BAND: f64 = 70.0;

/// Angle of `pct` on a semicircle running from 0 % at the left to 100 % at the right.
fn angle_of(pct: f64) -> f64 {
    PI * (1.0 - pct.clamp(0.0, 100.0) / 100.0)
}

struct Gauge<'a> {
    summary: &'a BreadthSummary,
}

impl Figure for Gauge<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, p: &Palette) -> DrawResult<DB> {
        let (w, h) = root.dim_in_pixel();
        let (w, h) = (w as f64, h as f64);
        let center = ((w / 2.0) as i32, (h * 0.62) as i32);
        let outer = (w * 0.38).min(h * 0.45);
        let inner = outer * 0.68;
        let centered = Pos::new(HPos::Center, VPos::Center);

        root.draw_text(
            "Market Breadth",
            &font(28, &p.text).pos(Pos::new(HPos::Center, VPos::Top)),
            (center.0, 16),
        )?;

        let bands = [
            (0.0, BEARISH_BAND, p.bearish),
            (BEARISH_BAND, BULLISH_BAND, p.neutral),
            (BULLISH_BAND, 100.0, p.bullish),
        ];
        for (from, to, color) in bands {
            root.draw(&Polygon::new(
                annular_sector(center, outer, inner, angle_of(to), angle_of(from)),
                color.mix(0.85).filled(),
            ))?;
        }

        for tick in [0.0, BEARISH_BAND, 50.0, BULLISH_BAND, 100.0] {
            root.draw_text(
                &format!("{:.0}%", tick),
                &font(14, &p.text).pos(centered),
                polar(center, outer + 18.0, angle_of(tick)),
            )?;
        }

        // Needle
        let theta = angle_of(self.summary.bullish_pct);
        let tip = polar(center, outer * 0.95, theta);
        let left = polar(center, 8.0, theta + PI / 2.0);
        let right = polar(center, 8.0, theta - PI / 2.0);
        root.draw(&Polygon::new(vec![left, tip, right], p.text.filled()))?;
        root.draw(&Circle::new(center, 10, p.text.filled()))?;

        root.draw_text(
            &format!("{:.1}% bullish", self.summary.bullish_pct),
            &font(34, &p.text).pos(centered),
            (center.0, center.1 + (h * 0.09) as i32),
        )?;
        root.draw_text(
            &self.summary.regime.to_string(),
            &font(22, &band_color(p, self.summary.bullish_pct)).pos(centered),
            (center.0, center.1 + (h * 0.16) as i32),
        )?;
        root.draw_text(
            &format!(
                "Bullish: {}   Bearish: {}   Total: {}",
                self.summary.bullish, self.summary.bearish, self.summary.total
            ),
            &font(16, &p.text).pos(centered),
            (center.0, center.1 + (h * 0.23) as i32),
        )?;

        Ok(())
    }
}

fn band_color(p: &Palette, bullish_pct: f64) -> RGBColor {
    if bullish_pct >= BULLISH_BAND {
        p.bullish
    } else if bullish_pct <= BEARISH_BAND {
        p.bearish
    } else {
        p.neutral
    }
}

/// Render the semicircular breadth gauge.
pub fn render_gauge(summary: &BreadthSummary, path: &Path, options: &ChartOptions) -> Result<(), ChartError> {
    if summary.total == 0 {
        return Err(ChartError::EmptyInput("breadth summary has no constituents".to_string()));
    }
    render(&Gauge { summary }, path, options)
}
