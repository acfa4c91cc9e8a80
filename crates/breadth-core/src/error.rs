//! Error types for the breadth pipeline.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum BreadthError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid lookback: {0}")]
    InvalidLookback(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error: {code} - {description}")]
    Api { code: String, description: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Benchmark {0} has no complete price history")]
    MissingBenchmark(String),

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Chart rendering errors.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Render error: {0}")]
    Render(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Nothing to plot: {0}")]
    EmptyInput(String),
}

/// Result type alias for breadth operations.
pub type BreadthResult<T> = Result<T, BreadthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: BreadthError = DataError::MissingBenchmark("SPY".to_string()).into();
        assert!(matches!(err, BreadthError::Data(_)));
        assert_eq!(
            err.to_string(),
            "Data error: Benchmark SPY has no complete price history"
        );
    }

    #[test]
    fn test_indicator_error_display() {
        let err = IndicatorError::InsufficientData {
            required: 50,
            available: 10,
        };
        assert_eq!(err.to_string(), "Insufficient data: need 50 points, have 10");
    }
}
