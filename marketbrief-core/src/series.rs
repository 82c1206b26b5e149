//! TimeSeries — the fundamental price data unit.
//!
//! One symbol's daily closes on a strictly increasing date axis. Gaps are
//! allowed (market holidays); duplicate or out-of-order dates are not.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from series construction.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("dates and values have different lengths ({dates} vs {values})")]
    LengthMismatch { dates: usize, values: usize },

    #[error("dates not strictly increasing at index {index} ({prev} >= {next})")]
    UnorderedDates {
        index: usize,
        prev: NaiveDate,
        next: NaiveDate,
    },
}

/// Daily close series for a single symbol.
///
/// `dates` and `values` are parallel vectors of equal length. Dates are
/// strictly increasing and unique (validated at construction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series, validating the date axis.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(SeriesError::UnorderedDates {
                    index: i + 1,
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self { dates, values })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Value at a specific date, if present.
    pub fn at(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.values[i])
    }

    /// Last (date, value) pair.
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        match (self.dates.last(), self.values.last()) {
            (Some(&d), Some(&v)) => Some((d, v)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn new_accepts_increasing_dates() {
        let ts = TimeSeries::new(
            vec![d("2024-01-02"), d("2024-01-03"), d("2024-01-05")],
            vec![100.0, 101.0, 102.0],
        )
        .unwrap();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.at(d("2024-01-03")), Some(101.0));
        assert_eq!(ts.at(d("2024-01-04")), None);
    }

    #[test]
    fn new_rejects_duplicate_dates() {
        let err = TimeSeries::new(
            vec![d("2024-01-02"), d("2024-01-02")],
            vec![100.0, 101.0],
        )
        .unwrap_err();
        assert!(matches!(err, SeriesError::UnorderedDates { index: 1, .. }));
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = TimeSeries::new(vec![d("2024-01-02")], vec![100.0, 101.0]).unwrap_err();
        assert!(matches!(err, SeriesError::LengthMismatch { .. }));
    }

    #[test]
    fn last_pair() {
        let ts = TimeSeries::new(
            vec![d("2024-01-02"), d("2024-01-03")],
            vec![100.0, 101.0],
        )
        .unwrap();
        assert_eq!(ts.last(), Some((d("2024-01-03"), 101.0)));
    }
}
