//! Output backends and shared drawing helpers.

use breadth_core::error::ChartError;
use breadth_core::types::{ChartFormat, Theme};
use breadth_indicators::simd::minmax_simd;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;
use tracing::debug;

use crate::Palette;

/// Canvas size and theme of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1000,
            theme: Theme::Dark,
        }
    }
}

pub(crate) type DrawResult<DB> =
    Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// A chart that can be painted onto any plotters backend.
pub(crate) trait Figure {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, palette: &Palette) -> DrawResult<DB>;
}

/// Render `figure` to `path`, choosing the backend from the extension.
pub(crate) fn render<F: Figure>(figure: &F, path: &Path, options: &ChartOptions) -> Result<(), ChartError> {
    let size = (options.width, options.height);
    let palette = Palette::for_theme(options.theme);

    match ChartFormat::from_path(path)? {
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            paint(figure, &root, &palette)?;
        }
        ChartFormat::Png => render_png(figure, path, size, &palette)?,
    }

    debug!(path = %path.display(), width = size.0, height = size.1, "Chart written");
    Ok(())
}

fn paint<F: Figure, DB: DrawingBackend>(
    figure: &F,
    root: &DrawingArea<DB, Shift>,
    palette: &Palette,
) -> Result<(), ChartError> {
    root.fill(&palette.background).map_err(render_err)?;
    figure.draw(root, palette).map_err(render_err)?;
    root.present().map_err(render_err)
}

#[cfg(feature = "ttf")]
fn render_png<F: Figure>(figure: &F, path: &Path, size: (u32, u32), palette: &Palette) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    paint(figure, &root, palette)
}

#[cfg(not(feature = "ttf"))]
fn render_png<F: Figure>(_figure: &F, _path: &Path, _size: (u32, u32), _palette: &Palette) -> Result<(), ChartError> {
    Err(ChartError::UnsupportedFormat(
        "png output requires the `ttf` feature".to_string(),
    ))
}

fn render_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Render(e.to_string())
}

pub(crate) fn font(size: u32, color: &RGBColor) -> TextStyle<'static> {
    ("sans-serif", size).into_font().color(color)
}

/// Point at `radius` pixels and `angle` radians from `center`, y pointing up.
pub(crate) fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 - (radius * angle.sin()).round() as i32,
    )
}

/// Outline of a ring segment between two angles, counter-clockwise.
pub(crate) fn annular_sector(
    center: (i32, i32),
    outer: f64,
    inner: f64,
    start: f64,
    end: f64,
) -> Vec<(i32, i32)> {
    let steps = (((end - start).abs() / PI * 90.0).ceil() as usize).max(2);
    let angle = |i: usize| start + (end - start) * i as f64 / steps as f64;

    let mut points: Vec<(i32, i32)> = (0..=steps).map(|i| polar(center, outer, angle(i))).collect();
    points.extend((0..=steps).rev().map(|i| polar(center, inner, angle(i))));
    points
}

/// Pad a data range so points do not sit on the frame; degenerate ranges widen by one.
pub(crate) fn padded_range<I: IntoIterator<Item = f64>>(values: I, pad: f64) -> (f64, f64) {
    let finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    let Some((min, max)) = minmax_simd(&finite) else {
        return (-1.0, 1.0);
    };

    if max - min < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let margin = (max - min) * pad;
    (min - margin, max + margin)
}
