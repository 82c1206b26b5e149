//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! middle = sma(close, window)
//! upper/lower = middle +/- k * rolling_stddev(close, window)
//!
//! Uses sample stddev (n - 1), per `stddev.rs`. Lookback: window - 1.

use super::sma::sma;
use super::stddev::rolling_stddev;

/// The three Bollinger band lines, all input-length.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Standard parameterization is `bollinger(values, 20, 2.0)`.
pub fn bollinger(values: &[f64], window: usize, k: f64) -> BollingerBands {
    let middle = sma(values, window);
    let stddev = rolling_stddev(values, window);

    let upper: Vec<f64> = middle
        .iter()
        .zip(&stddev)
        .map(|(m, s)| m + k * s)
        .collect();
    let lower: Vec<f64> = middle
        .iter()
        .zip(&stddev)
        .map(|(m, s)| m - k * s)
        .collect();

    BollingerBands {
        middle,
        upper,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        let bands = bollinger(&values, 3, 2.0);
        assert!(bands.middle[1].is_nan());
        assert_approx(bands.middle[2], 11.0, DEFAULT_EPSILON);
        assert_approx(bands.middle[3], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        let bands = bollinger(&values, 3, 2.0);
        for i in 2..5 {
            let up = bands.upper[i] - bands.middle[i];
            let down = bands.middle[i] - bands.lower[i];
            assert_approx(up, down, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn bollinger_sample_stddev_width() {
        // window [2,4,6]: sample stddev = 2, k = 2 → half-width 4 around mean 4
        let values = [2.0, 4.0, 6.0];
        let bands = bollinger(&values, 3, 2.0);
        assert_approx(bands.upper[2], 8.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[2], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let values = [100.0; 4];
        let bands = bollinger(&values, 3, 2.0);
        assert_approx(bands.upper[2], 100.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[2], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_warmup_is_nan() {
        let values = [10.0, 11.0, 12.0, 13.0];
        let bands = bollinger(&values, 3, 2.0);
        assert!(bands.upper[0].is_nan());
        assert!(bands.upper[1].is_nan());
        assert!(!bands.upper[2].is_nan());
    }
}
