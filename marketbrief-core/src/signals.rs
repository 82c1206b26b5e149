//! Crossover signal engine.
//!
//! Single left-to-right walk over a MACD/signal-line pair gated by RSI.
//! A buy fires on an upward MACD cross with RSI below the neutral level;
//! a sell fires on a downward cross with RSI above it. No smoothing,
//! hysteresis, or cooldown between signals — a known limitation of the
//! strategy, preserved rather than silently fixed.

use serde::{Deserialize, Serialize};

/// Numeric levels used for signal gating and narrative classification.
///
/// These are conventional charting heuristics with no cited backing, so
/// they are carried as configuration instead of inlined constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thresholds {
    /// RSI level separating buy-side from sell-side gating.
    pub rsi_neutral: f64,
    /// RSI above this reads as overbought.
    pub rsi_overbought: f64,
    /// RSI below this reads as oversold.
    pub rsi_oversold: f64,
    /// Percent deviation from MA200 marking over/under-valuation.
    pub ma200_deviation_pct: f64,
    /// |correlation| above this reads as a real relationship.
    pub correlation_band: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            rsi_neutral: 50.0,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            ma200_deviation_pct: 15.0,
            correlation_band: 0.3,
        }
    }
}

/// Buy/sell event series plus any data-integrity warnings.
///
/// Both vectors are input-length, default false, true only at firing
/// indices.
#[derive(Debug, Clone, Default)]
pub struct Signals {
    pub buy: Vec<bool>,
    pub sell: Vec<bool>,
    pub warnings: Vec<String>,
}

impl Signals {
    /// Indices where a buy fired.
    pub fn buy_indices(&self) -> Vec<usize> {
        self.buy
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }

    /// Indices where a sell fired.
    pub fn sell_indices(&self) -> Vec<usize> {
        self.sell
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect()
    }
}

/// Walk the series once and emit crossover signals.
///
/// Index 0 can never fire (no previous sample). An index is skipped
/// entirely when the current RSI or the current/previous signal-line value
/// is NaN. Buy and sell conditions are evaluated independently: the cross
/// direction makes them mutually exclusive by construction, but if both
/// ever hold at one index a warning is recorded instead of trusting that.
pub fn crossover_signals(
    macd: &[f64],
    signal: &[f64],
    rsi: &[f64],
    thresholds: &Thresholds,
) -> Signals {
    let n = macd.len().min(signal.len()).min(rsi.len());
    let mut out = Signals {
        buy: vec![false; n],
        sell: vec![false; n],
        warnings: Vec::new(),
    };

    for i in 1..n {
        if rsi[i].is_nan() || signal[i].is_nan() || signal[i - 1].is_nan() {
            continue;
        }
        if macd[i].is_nan() || macd[i - 1].is_nan() {
            continue;
        }

        let crossed_up = macd[i] > signal[i] && macd[i - 1] <= signal[i - 1];
        let crossed_down = macd[i] < signal[i] && macd[i - 1] >= signal[i - 1];

        let buy = crossed_up && rsi[i] < thresholds.rsi_neutral;
        let sell = crossed_down && rsi[i] > thresholds.rsi_neutral;

        if buy && sell {
            out.warnings.push(format!(
                "buy and sell both fired at index {i} (macd={}, signal={}, rsi={})",
                macd[i], signal[i], rsi[i]
            ));
        }
        out.buy[i] = buy;
        out.sell[i] = sell;
    }

    out
}
