//! CSV price import.
//!
//! One file per symbol under a data directory: `<dir>/<symbol>.csv` with a
//! `date,close` header, dates as YYYY-MM-DD in ascending order. Ticker
//! characters that are awkward in filenames (`^`, `=`, `/`) are sanitized
//! to `_`, so `HG=F` is read from `HG_F.csv`.

use super::provider::{DataError, DataProvider};
use crate::series::TimeSeries;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    close: f64,
}

/// Reads per-symbol CSV files from a directory.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    data_dir: PathBuf,
}

impl CsvProvider {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Filename-safe form of a ticker symbol.
    pub fn sanitize_symbol(symbol: &str) -> String {
        symbol
            .chars()
            .map(|c| match c {
                '^' | '=' | '/' | '\\' => '_',
                other => other,
            })
            .collect()
    }

    fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.csv", Self::sanitize_symbol(symbol)))
    }

    fn read_symbol(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeries, DataError> {
        let path = self.symbol_path(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let path_str = path.display().to_string();
        let mut reader = csv::Reader::from_path(&path).map_err(|e| DataError::Io {
            path: path_str.clone(),
            source: std::io::Error::other(e),
        })?;

        let mut dates = Vec::new();
        let mut values = Vec::new();
        for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
            let line = i + 2; // header is line 1
            let row = row.map_err(|e| DataError::Parse {
                path: path_str.clone(),
                line,
                message: e.to_string(),
            })?;
            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|e| {
                DataError::Parse {
                    path: path_str.clone(),
                    line,
                    message: format!("bad date '{}': {e}", row.date),
                }
            })?;
            if date < start || date > end {
                continue;
            }
            dates.push(date);
            values.push(row.close);
        }

        if dates.is_empty() {
            return Err(DataError::EmptyRange {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }

        TimeSeries::new(dates, values).map_err(|e| DataError::Parse {
            path: path_str,
            line: 0,
            message: e.to_string(),
        })
    }
}

/// Write a series as `<dir>/<sanitized symbol>.csv` in the import format.
/// Returns the path written.
pub fn export_csv(
    dir: &Path,
    symbol: &str,
    series: &TimeSeries,
) -> Result<PathBuf, DataError> {
    let path = dir.join(format!("{}.csv", CsvProvider::sanitize_symbol(symbol)));
    let path_str = path.display().to_string();
    let io_err = |e: std::io::Error| DataError::Io {
        path: path_str.clone(),
        source: e,
    };
    std::fs::create_dir_all(dir).map_err(&io_err)?;
    let mut writer = csv::Writer::from_path(&path).map_err(|e| DataError::Io {
        path: path_str.clone(),
        source: std::io::Error::other(e),
    })?;
    writer
        .write_record(["date", "close"])
        .map_err(|e| DataError::Io {
            path: path_str.clone(),
            source: std::io::Error::other(e),
        })?;
    for (date, value) in series.dates.iter().zip(&series.values) {
        writer
            .write_record([date.format("%Y-%m-%d").to_string(), format!("{value:.6}")])
            .map_err(|e| DataError::Io {
                path: path_str.clone(),
                source: std::io::Error::other(e),
            })?;
    }
    writer.flush().map_err(&io_err)?;
    Ok(path)
}

impl DataProvider for CsvProvider {
    fn fetch(
        &self,
        symbols: &[&str],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<String, TimeSeries>, DataError> {
        let mut out = HashMap::new();
        for &symbol in symbols {
            let series = self.read_symbol(symbol, start, end)?;
            out.insert(symbol.to_string(), series);
        }
        Ok(out)
    }
}
