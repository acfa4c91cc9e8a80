//! Bulk retrieval of a symbol universe.

use breadth_core::error::DataError;
use breadth_core::traits::DataSource;
use breadth_core::types::{Interval, Lookback, PriceSeries, PriceTable};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::PriceCache;

/// Parameters of a bulk download.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Symbols to fetch, benchmark included
    pub symbols: Vec<String>,
    pub interval: Interval,
    pub lookback: Lookback,
    /// Maximum number of requests in flight
    pub concurrency: usize,
}

/// Result of a bulk download.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Union-of-dates panel of every symbol that returned data
    pub table: PriceTable,
    /// Symbols that failed, with the reason
    pub failed: Vec<(String, String)>,
    /// Symbols served from the cache
    pub cached: usize,
}

/// Fetch every symbol of the request and align the results.
///
/// Requests run concurrently up to `concurrency`. A symbol that fails is
/// logged and left out of the table; the call only fails when nothing at all
/// could be retrieved. Columns follow the order of `request.symbols`.
pub async fn fetch_universe(
    source: &dyn DataSource,
    request: &FetchRequest,
    mut cache: Option<&mut PriceCache>,
) -> Result<FetchOutcome, DataError> {
    let interval = request.interval;
    let lookback = request.lookback;

    let mut fetched: HashMap<String, PriceSeries> = HashMap::with_capacity(request.symbols.len());
    let mut pending = Vec::new();

    for symbol in &request.symbols {
        if fetched.contains_key(symbol) || pending.contains(symbol) {
            continue;
        }
        match cache.as_deref_mut().and_then(|c| c.get(symbol, interval, lookback)) {
            Some(series) => {
                fetched.insert(symbol.clone(), series);
            }
            None => pending.push(symbol.clone()),
        }
    }
    let cached = fetched.len();

    info!(
        source = source.name(),
        requested = request.symbols.len(),
        cached,
        pending = pending.len(),
        "Acquiring price history"
    );

    let results: Vec<(String, Result<PriceSeries, DataError>)> = stream::iter(pending)
        .map(|symbol| async move {
            let result = source.fetch_closes(&symbol, interval, lookback).await;
            (symbol, result)
        })
        .buffer_unordered(request.concurrency.max(1))
        .collect()
        .await;

    let mut failed = Vec::new();
    for (symbol, result) in results {
        match result {
            Ok(series) if !series.is_empty() => {
                debug!(symbol = %symbol, points = series.len(), "Fetched");
                if let Some(cache) = cache.as_deref_mut() {
                    if let Err(e) = cache.put(&series, lookback) {
                        warn!(symbol = %symbol, error = %e, "Failed to cache series");
                    }
                }
                fetched.insert(symbol, series);
            }
            Ok(_) => {
                warn!(symbol = %symbol, "No observations returned");
                failed.push((symbol, DataError::NoDataAvailable.to_string()));
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Fetch failed");
                failed.push((symbol, e.to_string()));
            }
        }
    }

    if fetched.is_empty() {
        return Err(DataError::NoDataAvailable);
    }

    // Restore configured order
    failed.sort_by_key(|(symbol, _)| request.symbols.iter().position(|s| s == symbol));
    let ordered: Vec<PriceSeries> = request
        .symbols
        .iter()
        .filter_map(|s| fetched.remove(s))
        .collect();

    let table = PriceTable::from_series(interval, ordered);
    info!(
        symbols = table.width(),
        rows = table.len(),
        failed = failed.len(),
        "Price history aligned"
    );

    Ok(FetchOutcome {
        table,
        failed,
        cached,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use breadth_core::types::PricePoint;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct MockSource {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl MockSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DataSource for MockSource {
        async fn fetch_closes(
            &self,
            symbol: &str,
            interval: Interval,
            _lookback: Lookback,
        ) -> Result<PriceSeries, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match symbol {
                "DEAD" => Err(DataError::SymbolNotFound(symbol.to_string())),
                "EMPTY" => Ok(PriceSeries::new(symbol, interval, vec![])),
                _ => {
                    // Shorter history for NEW so the panel has gaps
                    let start = if symbol == "NEW" { 3 } else { 1 };
                    let points = (start..=5)
                        .map(|day| {
                            PricePoint::new(
                                NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                                day as f64,
                            )
                        })
                        .collect();
                    Ok(PriceSeries::new(symbol, interval, points))
                }
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn request(symbols: &[&str], concurrency: usize) -> FetchRequest {
        FetchRequest {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            interval: Interval::Daily,
            lookback: Lookback::Year1,
            concurrency,
        }
    }

    #[tokio::test]
    async fn test_failures_are_skipped() {
        let source = MockSource::new();
        let outcome = fetch_universe(
            &source,
            &request(&["AAPL", "DEAD", "NEW", "EMPTY", "SPY"], 4),
            None,
        )
        .await
        .unwrap();

        assert_eq!(
            outcome.table.symbols(),
            &["AAPL".to_string(), "NEW".to_string(), "SPY".to_string()]
        );
        assert_eq!(outcome.table.len(), 5);
        assert!(outcome.table.column("NEW").unwrap()[0].is_nan());

        let failed: Vec<&str> = outcome.failed.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(failed, vec!["DEAD", "EMPTY"]);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let source = MockSource::new();
        let symbols: Vec<String> = (0..12).map(|i| format!("S{}", i)).collect();
        let symbol_refs: Vec<&str> = symbols.iter().map(String::as_str).collect();

        fetch_universe(&source, &request(&symbol_refs, 3), None)
            .await
            .unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 12);
        assert!(source.max_in_flight.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_cache_short_circuits_requests() {
        let source = MockSource::new();
        let mut cache = PriceCache::in_memory();

        let req = request(&["AAPL", "SPY"], 2);
        fetch_universe(&source, &req, Some(&mut cache)).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        let outcome = fetch_universe(&source, &req, Some(&mut cache)).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.cached, 2);
        assert_eq!(outcome.table.width(), 2);
    }

    #[tokio::test]
    async fn test_everything_failing_is_an_error() {
        let source = MockSource::new();
        let result = fetch_universe(&source, &request(&["DEAD"], 1), None).await;
        assert!(matches!(result, Err(DataError::NoDataAvailable)));
    }

    #[tokio::test]
    async fn test_duplicate_symbols_fetched_once() {
        let source = MockSource::new();
        let outcome = fetch_universe(&source, &request(&["SPY", "SPY"], 2), None)
            .await
            .unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.table.width(), 1);
    }
}
