//! Rolling standard deviation.
//!
//! Sample convention (n - 1 denominator), matching the band-width behavior
//! of the upstream data-analysis stack this pipeline reproduces. A window
//! of 1 therefore has undefined dispersion and yields NaN.

/// Trailing sample standard deviation over `window` values.
pub fn rolling_stddev(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window < 2 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        let mean = slice.iter().sum::<f64>() / window as f64;
        let sum_sq: f64 = slice.iter().map(|v| (v - mean) * (v - mean)).sum();
        result[i] = (sum_sq / (window as f64 - 1.0)).sqrt();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn stddev_known_value() {
        // sample stddev of [2, 4, 6]: mean 4, sum_sq 8, 8/2 = 4, sqrt = 2
        let result = rolling_stddev(&[2.0, 4.0, 6.0], 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn stddev_constant_is_zero() {
        let result = rolling_stddev(&[5.0; 6], 4);
        assert_approx(result[3], 0.0, DEFAULT_EPSILON);
        assert_approx(result[5], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn stddev_window_1_is_nan() {
        let result = rolling_stddev(&[1.0, 2.0, 3.0], 1);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn stddev_nan_in_window() {
        let result = rolling_stddev(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 3);
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
        assert!(!result[4].is_nan());
    }
}
