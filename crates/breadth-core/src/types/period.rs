//! Sampling interval and history range definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// Sampling interval of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    /// Daily closes
    #[serde(rename = "1d")]
    #[default]
    Daily,
    /// Weekly closes
    #[serde(rename = "1wk")]
    Weekly,
    /// Monthly closes
    #[serde(rename = "1mo")]
    Monthly,
}

impl Interval {
    /// Number of periods in a trading year, used for annualization.
    pub fn periods_per_year(&self) -> f64 {
        match self {
            Interval::Daily => 252.0,
            Interval::Weekly => 52.0,
            Interval::Monthly => 12.0,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Interval {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" | "day" | "daily" => Ok(Interval::Daily),
            "1wk" | "1w" | "week" | "weekly" => Ok(Interval::Weekly),
            "1mo" | "month" | "monthly" => Ok(Interval::Monthly),
            _ => Err(DataError::InvalidInterval(s.to_string())),
        }
    }
}

/// History range requested from a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Lookback {
    #[serde(rename = "1mo")]
    Month1,
    #[serde(rename = "3mo")]
    Month3,
    #[serde(rename = "6mo")]
    Month6,
    #[serde(rename = "1y")]
    #[default]
    Year1,
    #[serde(rename = "2y")]
    Year2,
    #[serde(rename = "5y")]
    Year5,
    #[serde(rename = "10y")]
    Year10,
    /// Year to date
    #[serde(rename = "ytd")]
    YearToDate,
    /// Full available history
    #[serde(rename = "max")]
    Max,
}

impl Lookback {
    /// Approximate calendar days covered, `None` for open-ended ranges.
    pub fn approx_days(&self) -> Option<u32> {
        match self {
            Lookback::Month1 => Some(30),
            Lookback::Month3 => Some(91),
            Lookback::Month6 => Some(182),
            Lookback::Year1 => Some(365),
            Lookback::Year2 => Some(730),
            Lookback::Year5 => Some(1826),
            Lookback::Year10 => Some(3652),
            Lookback::YearToDate | Lookback::Max => None,
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Lookback::Month1 => "1mo",
            Lookback::Month3 => "3mo",
            Lookback::Month6 => "6mo",
            Lookback::Year1 => "1y",
            Lookback::Year2 => "2y",
            Lookback::Year5 => "5y",
            Lookback::Year10 => "10y",
            Lookback::YearToDate => "ytd",
            Lookback::Max => "max",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Lookback {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1mo" => Ok(Lookback::Month1),
            "3mo" => Ok(Lookback::Month3),
            "6mo" => Ok(Lookback::Month6),
            "1y" | "12mo" => Ok(Lookback::Year1),
            "2y" => Ok(Lookback::Year2),
            "5y" => Ok(Lookback::Year5),
            "10y" => Ok(Lookback::Year10),
            "ytd" => Ok(Lookback::YearToDate),
            "max" => Ok(Lookback::Max),
            _ => Err(DataError::InvalidLookback(s.to_string())),
        }
    }
}
