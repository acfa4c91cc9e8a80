//! Core types and traits for the market breadth pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Price data types (PriceSeries, PriceTable)
//! - Sampling interval and lookback definitions
//! - Regime classification
//! - Core traits for data sources, indicators and statistics

pub mod types;
pub mod traits;
pub mod error;

pub use error::{BreadthError, BreadthResult};
pub use types::*;
pub use traits::*;
