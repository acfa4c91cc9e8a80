//! Data source trait definitions.

use crate::error::DataError;
use crate::types::{Interval, Lookback, PriceSeries};
use async_trait::async_trait;

/// Trait for historical close-price sources.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch historical closes.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `interval` - Sampling interval
    /// * `lookback` - History range ending today
    ///
    /// # Returns
    /// A series ordered from oldest to newest
    async fn fetch_closes(
        &self,
        symbol: &str,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<PriceSeries, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
