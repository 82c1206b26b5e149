//! Pearson correlation — full-series and trailing-window.
//!
//! Rolling values are NOT clamped to [-1, 1]: tiny floating-point
//! excursions outside the domain are left visible to downstream code.

/// Pearson correlation over the full series, skipping pairs where either
/// side is NaN. Returns NaN if fewer than two complete pairs remain or if
/// either side has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(&x, &y)| (x, y))
        .collect();
    pearson_of_pairs(&pairs)
}

/// Trailing-window Pearson correlation.
///
/// NaN for the first `window - 1` indices and wherever the window contains
/// a NaN on either side.
pub fn rolling_correlation(a: &[f64], b: &[f64], window: usize) -> Vec<f64> {
    let n = a.len().min(b.len());
    let mut result = vec![f64::NAN; n];
    if window < 2 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let range = (i + 1 - window)..=i;
        let wa = &a[range.clone()];
        let wb = &b[range];
        if wa.iter().any(|v| v.is_nan()) || wb.iter().any(|v| v.is_nan()) {
            continue;
        }
        let pairs: Vec<(f64, f64)> = wa.iter().zip(wb).map(|(&x, &y)| (x, y)).collect();
        result[i] = pearson_of_pairs(&pairs);
    }

    result
}

fn pearson_of_pairs(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }
    let nf = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}
