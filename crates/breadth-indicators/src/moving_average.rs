//! Moving average and trend-strength statistics.

use breadth_core::error::IndicatorError;
use breadth_core::traits::{Indicator, Statistic};

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Most recent SMA value.
    pub fn last(&self, data: &[f64]) -> Result<f64, IndicatorError> {
        self.validate_data(data)?;
        let window = &data[data.len() - self.period..];
        Ok(window.iter().sum::<f64>() / self.period as f64)
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Percent distance of the latest close from its SMA.
///
/// `(last - sma) / sma * 100`; positive values mean the price trades above
/// its trailing average.
#[derive(Debug, Clone)]
pub struct TrendDistance {
    sma: Sma,
}

impl TrendDistance {
    /// Create a trend-distance statistic over the given SMA window.
    pub fn new(window: usize) -> Self {
        Self {
            sma: Sma::new(window),
        }
    }
}

impl Statistic for TrendDistance {
    fn compute(&self, closes: &[f64]) -> Result<f64, IndicatorError> {
        let sma = self.sma.last(closes)?;
        let last = closes[closes.len() - 1];

        if sma == 0.0 || !sma.is_finite() || !last.is_finite() {
            return Err(IndicatorError::CalculationError(format!(
                "cannot measure distance from SMA {}",
                sma
            )));
        }

        Ok((last - sma) / sma * 100.0)
    }

    fn name(&self) -> &str {
        "distance_sma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::sma_simd;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[1] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[2] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let data = vec![1.0, 2.0, 3.0];

        assert!(sma.calculate(&data).is_empty());
        assert_eq!(
            sma.last(&data),
            Err(IndicatorError::InsufficientData {
                required: 5,
                available: 3
            })
        );
    }

    #[test]
    fn test_sma_last_matches_series() {
        let data: Vec<f64> = (0..120).map(|i| 100.0 + (i as f64 * 0.2).sin() * 4.0).collect();
        let sma = Sma::new(50);

        let series = sma.calculate(&data);
        let last = sma.last(&data).unwrap();
        assert!((series[series.len() - 1] - last).abs() < 1e-9);

        let simd = sma_simd(&data, 50);
        assert_eq!(simd.len(), series.len());
        assert!((simd[0] - series[0]).abs() < 1e-9);
    }

    #[test]
    fn test_trend_distance_above_average() {
        // SMA of the last 4 = (10 + 10 + 10 + 14) / 4 = 11
        let closes = vec![5.0, 10.0, 10.0, 10.0, 14.0];
        let distance = TrendDistance::new(4).compute(&closes).unwrap();
        assert!((distance - (3.0 / 11.0 * 100.0)).abs() < 1e-10);
    }

    #[test]
    fn test_trend_distance_below_average() {
        let closes = vec![20.0, 20.0, 20.0, 8.0];
        // SMA = 17, distance = (8 - 17) / 17 * 100
        let distance = TrendDistance::new(4).compute(&closes).unwrap();
        assert!(distance < 0.0);
        assert!((distance + 9.0 / 17.0 * 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_trend_distance_flat_is_zero() {
        let closes = vec![50.0; 60];
        let distance = TrendDistance::new(50).compute(&closes).unwrap();
        assert!(distance.abs() < 1e-12);
    }

    #[test]
    fn test_trend_distance_errors() {
        let stat = TrendDistance::new(50);
        assert!(matches!(
            stat.compute(&[1.0; 10]),
            Err(IndicatorError::InsufficientData { .. })
        ));
        assert!(matches!(
            TrendDistance::new(2).compute(&[0.0, 0.0]),
            Err(IndicatorError::CalculationError(_))
        ));
    }
}
