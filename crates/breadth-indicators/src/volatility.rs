//! Annualized volatility.

use breadth_core::error::IndicatorError;
use breadth_core::traits::Statistic;
use statrs::statistics::Statistics;

use crate::returns::finite;

/// Annualized volatility of periodic returns, in percent.
///
/// Sample standard deviation of the finite returns scaled by
/// `sqrt(periods_per_year)`.
#[derive(Debug, Clone)]
pub struct AnnualizedVolatility {
    periods_per_year: f64,
}

impl AnnualizedVolatility {
    /// Create a volatility statistic for the given sampling frequency.
    pub fn new(periods_per_year: f64) -> Self {
        assert!(
            periods_per_year > 0.0,
            "Periods per year must be greater than 0"
        );
        Self { periods_per_year }
    }

    /// Volatility for daily returns (252 trading days).
    pub fn daily() -> Self {
        Self::new(252.0)
    }

    pub fn periods_per_year(&self) -> f64 {
        self.periods_per_year
    }
}

impl Default for AnnualizedVolatility {
    fn default() -> Self {
        Self::daily()
    }
}

impl Statistic for AnnualizedVolatility {
    fn compute(&self, returns: &[f64]) -> Result<f64, IndicatorError> {
        let clean = finite(returns);
        if clean.len() < 2 {
            return Err(IndicatorError::InsufficientData {
                required: 2,
                available: clean.len(),
            });
        }

        let std_dev = clean.iter().std_dev();
        Ok(std_dev * self.periods_per_year.sqrt() * 100.0)
    }

    fn name(&self) -> &str {
        "volatility"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_returns_have_zero_volatility() {
        let vol = AnnualizedVolatility::daily().compute(&[0.01; 30]).unwrap();
        assert!(vol.abs() < 1e-12);
    }

    #[test]
    fn test_known_volatility() {
        // Sample std of [0.01, -0.01] = sqrt(0.0002) = 0.0141421
        let vol = AnnualizedVolatility::daily().compute(&[0.01, -0.01]).unwrap();
        let expected = 0.0002_f64.sqrt() * 252.0_f64.sqrt() * 100.0;
        assert!((vol - expected).abs() < 1e-9);
        assert!((vol - 22.4499).abs() < 1e-3);
    }

    #[test]
    fn test_nan_returns_are_skipped() {
        let with_nan = AnnualizedVolatility::daily()
            .compute(&[f64::NAN, 0.01, -0.01])
            .unwrap();
        let without = AnnualizedVolatility::daily().compute(&[0.01, -0.01]).unwrap();
        assert!((with_nan - without).abs() < 1e-12);
    }

    #[test]
    fn test_weekly_scaling() {
        let returns = [0.02, -0.01, 0.015, -0.005];
        let daily = AnnualizedVolatility::new(252.0).compute(&returns).unwrap();
        let weekly = AnnualizedVolatility::new(52.0).compute(&returns).unwrap();
        assert!((daily / weekly - (252.0_f64 / 52.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_insufficient_returns() {
        assert_eq!(
            AnnualizedVolatility::daily().compute(&[0.01, f64::NAN]),
            Err(IndicatorError::InsufficientData {
                required: 2,
                available: 1
            })
        );
    }
}
