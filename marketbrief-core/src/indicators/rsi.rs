//! Relative Strength Index.
//!
//! Rolling-mean variant: avg_gain and avg_loss are trailing simple means of
//! the per-step gains/losses over `period` (not Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), bounded [0, 100].
//! Edge cases: avg_loss == 0 → 100 (clamped, never a fault);
//! avg_gain == avg_loss == 0 → 50. First valid value at index `period`.

/// RSI over trailing `period` price deltas.
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    // Per-step gain/loss series; index 0 has no delta.
    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];
    for i in 1..n {
        let delta = values[i] - values[i - 1];
        if delta.is_nan() {
            continue;
        }
        gains[i] = if delta > 0.0 { delta } else { 0.0 };
        losses[i] = if delta < 0.0 { -delta } else { 0.0 };
    }

    for i in period..n {
        let window = (i + 1 - period)..=i;
        let g = &gains[window.clone()];
        let l = &losses[window];
        if g.iter().any(|v| v.is_nan()) || l.iter().any(|v| v.is_nan()) {
            continue;
        }
        let avg_gain = g.iter().sum::<f64>() / period as f64;
        let avg_loss = l.iter().sum::<f64>() / period as f64;

        result[i] = if avg_loss == 0.0 && avg_gain == 0.0 {
            50.0 // flat window, no movement either way
        } else if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };
    }

    result
}
