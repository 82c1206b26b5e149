//! Exponentially weighted moving average.
//!
//! Recursive: e[i] = alpha * v[i] + (1 - alpha) * e[i-1], alpha = 2/(span+1).
//! Seeded with e[0] = v[0] — no SMA seed and no adjust-style reweighting,
//! so e[0] is defined and there is no warmup run of NaN.

/// EWMA with smoothing factor `2 / (span + 1)`.
///
/// A NaN input taints every subsequent value (the recurrence cannot recover).
pub fn ewma(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n == 0 || span == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    if values[0].is_nan() {
        return result;
    }
    result[0] = values[0];

    let mut prev = values[0];
    for i in 1..n {
        if values[i].is_nan() {
            return result;
        }
        let e = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = e;
        prev = e;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ewma_seeds_at_first_value() {
        let result = ewma(&[100.0, 200.0], 9);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ewma_span_3_known_values() {
        // alpha = 2/(3+1) = 0.5
        // e[0] = 10
        // e[1] = 0.5*12 + 0.5*10 = 11
        // e[2] = 0.5*14 + 0.5*11 = 12.5
        let result = ewma(&[10.0, 12.0, 14.0], 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 11.0, DEFAULT_EPSILON);
        assert_approx(result[2], 12.5, DEFAULT_EPSILON);
    }

    #[test]
    fn ewma_span_1_tracks_input() {
        // alpha = 1: output equals input
        let values = [10.0, 20.0, 30.0];
        let result = ewma(&values, 1);
        for (r, v) in result.iter().zip(&values) {
            assert_approx(*r, *v, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ewma_constant_input_is_constant() {
        let result = ewma(&[42.0; 10], 5);
        for v in result {
            assert_approx(v, 42.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ewma_nan_taints_tail() {
        let result = ewma(&[10.0, 11.0, f64::NAN, 13.0], 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
    }

    #[test]
    fn ewma_empty_input() {
        assert!(ewma(&[], 5).is_empty());
    }
}
