//! marketbrief core — time series, indicators, signals, data, figures.
//!
//! This crate contains the computational heart of the report pipeline:
//! - `TimeSeries`/`Frame`: per-symbol close series and inner-join alignment
//! - Indicator library (SMA, EWMA, RSI, MACD, Bollinger, rolling stddev/
//!   correlation) as pure NaN-tolerant functions
//! - Crossover signal engine with configurable thresholds
//! - `DataProvider` trait with CSV and synthetic implementations
//! - Declarative figure model, figure surface, and renderer seam

pub mod chart;
pub mod data;
pub mod frame;
pub mod indicators;
pub mod series;
pub mod signals;

pub use frame::Frame;
pub use series::TimeSeries;
