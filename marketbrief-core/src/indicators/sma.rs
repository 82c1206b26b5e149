//! Simple moving average.
//!
//! Trailing arithmetic mean over a lookback window.
//! First valid value at index window - 1.

/// Trailing mean of the last `window` values.
///
/// Any NaN inside the current window yields NaN at that index.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = slice.iter().sum::<f64>() / window as f64;
    }

    result
}
