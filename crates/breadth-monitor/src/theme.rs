//! Chart colour themes.

use breadth_core::types::{Regime, Theme};
use plotters::style::RGBColor;

/// Resolved colours for a theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: RGBColor,
    pub text: RGBColor,
    pub grid: RGBColor,
    pub bullish: RGBColor,
    pub bearish: RGBColor,
    /// Middle band of the gauge
    pub neutral: RGBColor,
    /// Histogram bars and KDE line
    pub series: RGBColor,
    /// Outlier annotations
    pub highlight: RGBColor,
}

impl Palette {
    /// Colours for a chart theme.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                background: RGBColor(0, 0, 0),
                text: RGBColor(255, 255, 255),
                grid: RGBColor(128, 128, 128),
                bullish: RGBColor(0, 255, 0),
                bearish: RGBColor(255, 0, 0),
                neutral: RGBColor(255, 191, 0),
                series: RGBColor(0, 255, 255),
                highlight: RGBColor(255, 255, 0),
            },
            Theme::Light => Palette {
                background: RGBColor(255, 255, 255),
                text: RGBColor(20, 20, 20),
                grid: RGBColor(150, 150, 150),
                bullish: RGBColor(0, 150, 60),
                bearish: RGBColor(200, 30, 30),
                neutral: RGBColor(230, 160, 0),
                series: RGBColor(0, 120, 170),
                highlight: RGBColor(150, 90, 0),
            },
        }
    }

    pub fn regime(&self, regime: Regime) -> RGBColor {
        match regime {
            Regime::Bullish => self.bullish,
            Regime::Bearish => self.bearish,
        }
    }
}
