//! Synthetic price generation.
//!
//! Deterministic random walk per symbol, seeded from the symbol name, with
//! weekends skipped. Used as the offline stand-in for a market-data
//! provider in development runs and tests; results are plausible, not real.

use super::provider::{DataError, DataProvider};
use crate::series::TimeSeries;
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Generates a seeded random walk for any requested symbol.
#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider;

impl SyntheticProvider {
    pub fn new() -> Self {
        Self
    }

    /// FNV-1a over the symbol bytes; stable across runs so the same symbol
    /// always yields the same walk.
    fn seed_for(symbol: &str) -> u64 {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in symbol.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        hash
    }

    /// Generate a walk for one symbol over `start..=end`, business days only.
    pub fn generate(symbol: &str, start: NaiveDate, end: NaiveDate) -> TimeSeries {
        let mut rng = StdRng::seed_from_u64(Self::seed_for(symbol));
        let mut dates = Vec::new();
        let mut values = Vec::new();
        let mut price = 100.0_f64;
        let mut current = start;

        while current <= end {
            let weekday = current.weekday();
            if weekday == Weekday::Sat || weekday == Weekday::Sun {
                current += chrono::Duration::days(1);
                continue;
            }
            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            price *= 1.0 + daily_return;
            dates.push(current);
            values.push(price);
            current += chrono::Duration::days(1);
        }

        // Dates are constructed in ascending order, so this cannot fail.
        TimeSeries { dates, values }
    }
}

impl DataProvider for SyntheticProvider {
    fn fetch(
        &self,
        symbols: &[&str],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<String, TimeSeries>, DataError> {
        if start > end {
            return Err(DataError::Other(format!(
                "start {start} after end {end}"
            )));
        }
        let mut out = HashMap::new();
        for &symbol in symbols {
            out.insert(symbol.to_string(), Self::generate(symbol, start, end));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn deterministic_per_symbol() {
        let a = SyntheticProvider::generate("SPY", d("2024-01-01"), d("2024-03-01"));
        let b = SyntheticProvider::generate("SPY", d("2024-01-01"), d("2024-03-01"));
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn different_symbols_differ() {
        let a = SyntheticProvider::generate("SPY", d("2024-01-01"), d("2024-03-01"));
        let b = SyntheticProvider::generate("QQQ", d("2024-01-01"), d("2024-03-01"));
        assert_ne!(a.values, b.values);
    }

    #[test]
    fn skips_weekends() {
        let ts = SyntheticProvider::generate("SPY", d("2024-01-01"), d("2024-01-14"));
        for date in &ts.dates {
            let wd = date.weekday();
            assert!(wd != Weekday::Sat && wd != Weekday::Sun);
        }
        // Two full weeks: 10 business days
        assert_eq!(ts.len(), 10);
    }

    #[test]
    fn prices_stay_positive() {
        let ts = SyntheticProvider::generate("TSLA", d("2020-01-01"), d("2024-01-01"));
        assert!(ts.values.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn inverted_range_is_an_error() {
        let provider = SyntheticProvider::new();
        let err = provider
            .fetch(&["SPY"], d("2024-02-01"), d("2024-01-01"))
            .unwrap_err();
        assert!(matches!(err, DataError::Other(_)));
    }
}
