//! Per-asset trend regime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend regime of a single constituent relative to its moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Trading above its moving average
    Bullish,
    /// Trading at or below its moving average
    Bearish,
}

impl Regime {
    /// Classify from the percent distance to the moving average.
    ///
    /// Only a strictly positive distance is bullish; zero and `NaN` are bearish.
    pub fn from_distance(distance_pct: f64) -> Self {
        if distance_pct > 0.0 {
            Regime::Bullish
        } else {
            Regime::Bearish
        }
    }

    #[inline]
    pub fn is_bullish(&self) -> bool {
        matches!(self, Regime::Bullish)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Bullish => write!(f, "Bullish"),
            Regime::Bearish => write!(f, "Bearish"),
        }
    }
}
