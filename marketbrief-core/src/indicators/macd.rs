//! Moving Average Convergence Divergence.
//!
//! macd = ewma(close, fast) - ewma(close, slow)
//! signal = ewma(macd, signal_span)
//! histogram = macd - signal
//!
//! With first-element-seeded EWMAs all three lines are defined from index 0.

use super::ema::ewma;

/// MACD line, signal line, and histogram.
#[derive(Debug, Clone)]
pub struct Macd {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Standard parameterization is `macd(values, 12, 26, 9)`.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_span: usize) -> Macd {
    let fast_ema = ewma(values, fast);
    let slow_ema = ewma(values, slow);

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ewma(&macd_line, signal_span);
    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal)
        .map(|(m, s)| m - s)
        .collect();

    Macd {
        macd: macd_line,
        signal,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn macd_lengths_match_input() {
        let values: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let m = macd(&values, 12, 26, 9);
        assert_eq!(m.macd.len(), 50);
        assert_eq!(m.signal.len(), 50);
        assert_eq!(m.histogram.len(), 50);
    }

    #[test]
    fn macd_starts_at_zero() {
        // Both EMAs seed at values[0], so macd[0] = 0 and histogram[0] = 0.
        let values = [100.0, 101.0, 102.0, 103.0];
        let m = macd(&values, 2, 4, 3);
        assert_approx(m.macd[0], 0.0, DEFAULT_EPSILON);
        assert_approx(m.histogram[0], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_positive_in_uptrend() {
        // Steady rise: fast EMA sits above slow EMA once the trend develops.
        let values: Vec<f64> = (0..60).map(|i| 100.0 + 2.0 * i as f64).collect();
        let m = macd(&values, 12, 26, 9);
        assert!(m.macd[59] > 0.0);
    }

    #[test]
    fn macd_constant_input_is_zero() {
        let values = [50.0; 40];
        let m = macd(&values, 12, 26, 9);
        for i in 0..40 {
            assert_approx(m.macd[i], 0.0, DEFAULT_EPSILON);
            assert_approx(m.signal[i], 0.0, DEFAULT_EPSILON);
            assert_approx(m.histogram[i], 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn histogram_is_macd_minus_signal() {
        let values: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let m = macd(&values, 12, 26, 9);
        for i in 0..30 {
            assert_approx(m.histogram[i], m.macd[i] - m.signal[i], DEFAULT_EPSILON);
        }
    }
}
