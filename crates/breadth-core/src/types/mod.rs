//! Core data types for the breadth pipeline.

mod chart;
mod period;
mod price;
mod regime;
mod table;

pub use chart::{ChartFormat, Theme};
pub use period::{Interval, Lookback};
pub use price::{PricePoint, PriceSeries};
pub use regime::Regime;
pub use table::PriceTable;
