//! Close-price series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Interval;

/// A single dated close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Session date
    pub date: NaiveDate,
    /// Closing price (adjusted where the source provides it)
    pub close: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Close prices for one symbol, ordered from oldest to newest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Sampling interval of the points
    pub interval: Interval,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series, sorting by date and keeping the last point per date.
    pub fn new(symbol: impl Into<String>, interval: Interval, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            symbol: symbol.into(),
            interval,
            points: deduped,
        }
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the most recent point.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Get the oldest point.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Extract dates as a vector.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Get an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_series_sorted_on_construction() {
        let series = PriceSeries::new(
            "AAPL",
            Interval::Daily,
            vec![
                PricePoint::new(d(3), 102.0),
                PricePoint::new(d(1), 100.0),
                PricePoint::new(d(2), 101.0),
            ],
        );

        assert_eq!(series.closes(), vec![100.0, 101.0, 102.0]);
        assert_eq!(series.first().unwrap().date, d(1));
        assert_eq!(series.last().unwrap().date, d(3));
    }

    #[test]
    fn test_duplicate_dates_keep_last() {
        let series = PriceSeries::new(
            "MSFT",
            Interval::Daily,
            vec![
                PricePoint::new(d(1), 100.0),
                PricePoint::new(d(2), 101.0),
                PricePoint::new(d(2), 105.0),
            ],
        );

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![100.0, 105.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new("XOM", Interval::Weekly, vec![]);
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }
}
