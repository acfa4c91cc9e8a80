//! Trend, volatility and beta statistics.
//!
//! This crate provides the numeric core of the breadth pipeline:
//! - Simple moving average and distance-from-SMA trend strength
//! - Periodic returns with pairwise-complete alignment
//! - Annualized volatility
//! - Beta against a benchmark
//! - Gaussian kernel density estimates for distribution overlays
//!
//! Reductions over long return series go through the SIMD kernels in
//! [`simd`], which fall back to scalar loops for the tail of each slice.

pub mod beta;
pub mod kde;
pub mod moving_average;
pub mod returns;
pub mod simd;
pub mod volatility;

pub use beta::Beta;
pub use kde::gaussian_kde;
pub use moving_average::{Sma, TrendDistance};
pub use returns::{finite_pairs, pct_change};
pub use volatility::AnnualizedVolatility;
