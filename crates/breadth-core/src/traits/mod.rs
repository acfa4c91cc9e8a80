//! Core traits for the breadth pipeline.

mod data_source;
mod indicator;

pub use data_source::DataSource;
pub use indicator::{Indicator, Statistic};
