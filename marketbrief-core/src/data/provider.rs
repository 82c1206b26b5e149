//! Data provider trait and structured error types.
//!
//! The `DataProvider` trait abstracts over data sources (CSV import,
//! synthetic generation, a network client behind the scenes) so modules can
//! be fed from anything and mocked in tests.

use crate::series::TimeSeries;
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no data for '{symbol}' in range {start}..={end}")]
    EmptyRange {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("io error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in '{path}' line {line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for daily close-series providers.
///
/// A provider may return partially missing data per symbol; callers align
/// and drop incomplete rows (`Frame::join`). A completely unknown symbol is
/// an error.
pub trait DataProvider {
    /// Fetch closes for each symbol over `start..=end` (inclusive).
    fn fetch(
        &self,
        symbols: &[&str],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<String, TimeSeries>, DataError>;
}
