//! Indicator library — pure functions over a close-price series.
//!
//! Every function takes `&[f64]` and returns a `Vec<f64>` of the same
//! length. The first values up to the indicator's warmup are `f64::NAN`,
//! and a window larger than the series produces an all-NaN result rather
//! than an error (insufficient history is tolerated, not raised).
//! NaN inputs propagate to every affected output offset.

pub mod bollinger;
pub mod correlation;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use bollinger::{bollinger, BollingerBands};
pub use correlation::{pearson, rolling_correlation};
pub use ema::ewma;
pub use macd::{macd, Macd};
pub use rsi::rsi;
pub use sma::sma;
pub use stddev::rolling_stddev;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
