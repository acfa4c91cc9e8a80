//! Beta against a benchmark.
//!
//! `beta = cov(r_asset, r_benchmark) / var(r_benchmark)`, both with the sample
//! denominator, over the observations where both returns are finite.

use breadth_core::error::IndicatorError;

use crate::returns::finite_pairs;
use crate::simd::{covariance_simd, variance_simd};

/// Market beta estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Beta;

impl Beta {
    /// Minimum number of paired observations.
    pub const MIN_OBSERVATIONS: usize = 2;

    /// Compute beta from aligned return series.
    pub fn compute(asset: &[f64], benchmark: &[f64]) -> Result<f64, IndicatorError> {
        if asset.len() != benchmark.len() {
            return Err(IndicatorError::LengthMismatch {
                left: asset.len(),
                right: benchmark.len(),
            });
        }

        let (a, m) = finite_pairs(asset, benchmark);
        if a.len() < Self::MIN_OBSERVATIONS {
            return Err(IndicatorError::InsufficientData {
                required: Self::MIN_OBSERVATIONS,
                available: a.len(),
            });
        }

        let insufficient = || IndicatorError::InsufficientData {
            required: Self::MIN_OBSERVATIONS,
            available: a.len(),
        };
        let cov = covariance_simd(&a, &m).ok_or_else(insufficient)?;
        let var = variance_simd(&m).ok_or_else(insufficient)?;

        if var == 0.0 {
            return Err(IndicatorError::CalculationError(
                "benchmark returns have zero variance".to_string(),
            ));
        }

        Ok(cov / var)
    }
}
