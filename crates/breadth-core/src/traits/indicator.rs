//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for rolling technical indicators.
///
/// Indicators process price data and produce a derived series.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically prices)
    ///
    /// # Returns
    /// A vector of indicator values
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Scalar statistic reducing a whole series to one number.
pub trait Statistic: Send + Sync {
    /// Compute the statistic.
    fn compute(&self, data: &[f64]) -> Result<f64, IndicatorError>;

    /// Get the name of the statistic.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        type Output = f64;

        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            if data.len() < self.period {
                return vec![];
            }
            // Simple sum indicator for testing
            data.windows(self.period).map(|w| w.iter().sum()).collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    struct Range;

    impl Statistic for Range {
        fn compute(&self, data: &[f64]) -> Result<f64, IndicatorError> {
            if data.is_empty() {
                return Err(IndicatorError::InsufficientData {
                    required: 1,
                    available: 0,
                });
            }
            let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
            Ok(max - min)
        }

        fn name(&self) -> &str {
            "range"
        }
    }

    #[test]
    fn test_indicator_validation() {
        let indicator = TestIndicator { period: 5 };

        assert!(indicator.validate_data(&[1.0, 2.0, 3.0]).is_err());
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_ok());
    }

    #[test]
    fn test_indicator_calculate() {
        let indicator = TestIndicator { period: 3 };
        let result = indicator.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 6.0).abs() < 0.001); // 1+2+3
        assert!((result[2] - 12.0).abs() < 0.001); // 3+4+5
    }

    #[test]
    fn test_statistic_as_trait_object() {
        let stats: Vec<Box<dyn Statistic>> = vec![Box::new(Range)];
        assert!((stats[0].compute(&[3.0, 9.0, 1.0]).unwrap() - 8.0).abs() < 1e-12);
        assert!(stats[0].compute(&[]).is_err());
        assert_eq!(stats[0].name(), "range");
    }
}
