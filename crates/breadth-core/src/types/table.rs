//! Date-aligned panel of close prices.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{Interval, PriceSeries};
use crate::error::DataError;

/// Close prices for many symbols aligned on the union of their dates.
///
/// Cells with no observation hold `NaN`. Columns are kept in insertion order
/// so that output follows the order the universe was configured in.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    interval: Interval,
    dates: Vec<NaiveDate>,
    symbols: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl PriceTable {
    /// Build a table from individual series.
    ///
    /// The date axis is the sorted union of every series' dates. A symbol that
    /// appears twice keeps its last series.
    pub fn from_series(interval: Interval, series: Vec<PriceSeries>) -> Self {
        let dates: Vec<NaiveDate> = series
            .iter()
            .flat_map(|s| s.iter().map(|p| p.date))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let index: BTreeMap<NaiveDate, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut table = Self {
            interval,
            dates,
            symbols: Vec::with_capacity(series.len()),
            columns: HashMap::with_capacity(series.len()),
        };

        for s in series {
            let mut column = vec![f64::NAN; table.dates.len()];
            for point in s.iter() {
                if let Some(&i) = index.get(&point.date) {
                    column[i] = point.close;
                }
            }
            table.insert_column(s.symbol, column);
        }

        table
    }

    /// Build a table from an explicit date axis and columns.
    pub fn from_columns(
        interval: Interval,
        dates: Vec<NaiveDate>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, DataError> {
        let mut table = Self {
            interval,
            dates,
            symbols: Vec::with_capacity(columns.len()),
            columns: HashMap::with_capacity(columns.len()),
        };

        for (symbol, column) in columns {
            if column.len() != table.dates.len() {
                return Err(DataError::ParseError(format!(
                    "column {} has {} rows, expected {}",
                    symbol,
                    column.len(),
                    table.dates.len()
                )));
            }
            table.insert_column(symbol, column);
        }

        Ok(table)
    }

    fn insert_column(&mut self, symbol: String, column: Vec<f64>) {
        if !self.columns.contains_key(&symbol) {
            self.symbols.push(symbol.clone());
        }
        self.columns.insert(symbol, column);
    }

    /// Sampling interval of the rows.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Row dates, oldest first.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column symbols in insertion order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Get a column by symbol.
    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        self.columns.get(symbol).map(Vec::as_slice)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.symbols.len()
    }

    /// Remove every column that contains a missing value.
    ///
    /// Returns the removed symbols in their original order.
    pub fn drop_incomplete(&mut self) -> Vec<String> {
        let columns = &self.columns;
        let (keep, dropped): (Vec<String>, Vec<String>) =
            self.symbols.drain(..).partition(|symbol| {
                columns
                    .get(symbol)
                    .map(|c| !c.is_empty() && c.iter().all(|v| !v.is_nan()))
                    .unwrap_or(false)
            });

        for symbol in &dropped {
            self.columns.remove(symbol);
        }
        self.symbols = keep;

        dropped
    }

    /// Remove and return the benchmark column.
    pub fn split_benchmark(&mut self, benchmark: &str) -> Result<Vec<f64>, DataError> {
        let column = self
            .columns
            .remove(benchmark)
            .ok_or_else(|| DataError::MissingBenchmark(benchmark.to_string()))?;
        self.symbols.retain(|s| s != benchmark);
        Ok(column)
    }

    /// Iterate over `(symbol, column)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.symbols.iter().filter_map(move |symbol| {
            self.columns
                .get(symbol)
                .map(|c| (symbol.as_str(), c.as_slice()))
        })
    }
}
