//! Multi-symbol alignment onto a shared date axis.
//!
//! A `Frame` holds named columns over one common timeline. Alignment is an
//! inner join on dates followed by dropping any row where any column is NaN,
//! so derived computations (ratios, base-100 rebasing) never see missing data.

use crate::series::TimeSeries;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("no such column: {0}")]
    NoSuchColumn(String),

    #[error("base row {row} out of bounds (frame has {rows} rows)")]
    BaseRowOutOfBounds { row: usize, rows: usize },

    #[error("base row {row} contains a zero in column '{column}'")]
    ZeroBaseValue { row: usize, column: String },
}

/// Named columns over a shared, strictly increasing date axis.
///
/// Column order is the insertion order (fixed at construction), so output
/// formatting is deterministic.
#[derive(Debug, Clone)]
pub struct Frame {
    dates: Vec<NaiveDate>,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Frame {
    /// Inner-join the given series on shared dates, then drop every row
    /// where any column is NaN.
    ///
    /// The result may be empty if the symbols share no complete rows;
    /// callers are expected to report that rather than fail.
    pub fn join(series: &[(&str, &TimeSeries)]) -> Self {
        let names: Vec<String> = series.iter().map(|(n, _)| (*n).to_string()).collect();

        // Count date occurrences across all series; a date survives the
        // inner join iff every series has it.
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for (_, ts) in series {
            for &date in &ts.dates {
                *counts.entry(date).or_insert(0) += 1;
            }
        }
        let shared: Vec<NaiveDate> = counts
            .into_iter()
            .filter(|&(_, c)| c == series.len())
            .map(|(d, _)| d)
            .collect();

        let mut dates = Vec::new();
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); series.len()];
        for date in shared {
            let row: Vec<f64> = series
                .iter()
                .map(|(_, ts)| ts.at(date).unwrap_or(f64::NAN))
                .collect();
            if row.iter().any(|v| v.is_nan()) {
                continue; // drop incomplete row
            }
            dates.push(date);
            for (col, v) in columns.iter_mut().zip(row) {
                col.push(v);
            }
        }

        Self {
            dates,
            names,
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Result<&[f64], FrameError> {
        let idx = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| FrameError::NoSuchColumn(name.to_string()))?;
        Ok(&self.columns[idx])
    }

    /// Append a column computed as the element-wise ratio of two existing
    /// columns (e.g. copper/gold).
    pub fn add_ratio(
        &mut self,
        name: &str,
        numerator: &str,
        denominator: &str,
    ) -> Result<(), FrameError> {
        let num = self.column(numerator)?.to_vec();
        let den = self.column(denominator)?.to_vec();
        let ratio: Vec<f64> = num.iter().zip(&den).map(|(a, b)| a / b).collect();
        self.names.push(name.to_string());
        self.columns.push(ratio);
        Ok(())
    }

    /// Append an arbitrary derived column. Must match the frame's row count.
    pub fn add_column(&mut self, name: &str, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.dates.len());
        self.names.push(name.to_string());
        self.columns.push(values);
    }

    /// Rebase every column to 100 at `base_row`: `col[i] / col[base_row] * 100`.
    ///
    /// The drop-incomplete step in `join` guarantees the base row has no NaN,
    /// but a zero base value would poison the whole column and is rejected.
    pub fn rebase_100(&self, base_row: usize) -> Result<Frame, FrameError> {
        if base_row >= self.dates.len() {
            return Err(FrameError::BaseRowOutOfBounds {
                row: base_row,
                rows: self.dates.len(),
            });
        }
        let mut columns = Vec::with_capacity(self.columns.len());
        for (name, col) in self.names.iter().zip(&self.columns) {
            let base = col[base_row];
            if base == 0.0 {
                return Err(FrameError::ZeroBaseValue {
                    row: base_row,
                    column: name.clone(),
                });
            }
            columns.push(col.iter().map(|v| v / base * 100.0).collect());
        }
        Ok(Frame {
            dates: self.dates.clone(),
            names: self.names.clone(),
            columns,
        })
    }
}
