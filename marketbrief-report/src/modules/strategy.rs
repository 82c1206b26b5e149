//! Single-symbol signal strategy analysis.
//!
//! MA20/50/200, RSI(14), MACD(12,26,9), Bollinger(20,2) over a multi-year
//! window, crossover buy/sell signals, a narrative status report, and a
//! four-panel figure. Parameterized by symbol so the same routine serves
//! both the AAPL and TSLA runs of the report.

use super::{fmt_val, fmt_val4, AnalysisModule, ModuleCtx};
use chrono::Duration;
use marketbrief_core::chart::{Figure, Panel};
use marketbrief_core::indicators::{bollinger, macd, rsi, sma};
use marketbrief_core::signals::crossover_signals;

/// Rows considered "recent" when listing fresh signals.
const RECENT_ROWS: usize = 30;
/// Trading rows in roughly one year, for the trailing recap.
const YEAR_ROWS: usize = 252;

pub struct StrategyModule {
    id: String,
    symbol: String,
    lookback_years: i64,
}

impl StrategyModule {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, lookback_years: i64) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            lookback_years,
        }
    }
}

impl AnalysisModule for StrategyModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn run(&self, ctx: &mut ModuleCtx) -> anyhow::Result<()> {
        let end = ctx.today;
        let start = end - Duration::days(365 * self.lookback_years);

        ctx.say(format!("{} buy/sell point analysis", self.symbol));
        ctx.rule('=', 60);
        ctx.say(format!("Window: {start} ~ {end}"));
        ctx.rule('=', 60);

        let data = match ctx.provider.fetch(&[self.symbol.as_str()], start, end) {
            Ok(data) => data,
            Err(e) => {
                ctx.say(format!("Data unavailable: {e}"));
                return Ok(());
            }
        };
        let Some(series) = data.get(self.symbol.as_str()) else {
            ctx.say(format!("No series returned for {}", self.symbol));
            return Ok(());
        };
        if series.is_empty() {
            ctx.say("Series is empty after alignment; nothing to analyze.");
            return Ok(());
        }

        let dates = &series.dates;
        let closes = &series.values;
        let n = closes.len();

        let ma20 = sma(closes, 20);
        let ma50 = sma(closes, 50);
        let ma200 = sma(closes, 200);
        let rsi14 = rsi(closes, 14);
        let m = macd(closes, 12, 26, 9);
        let bands = bollinger(closes, 20, 2.0);
        let signals = crossover_signals(&m.macd, &m.signal, &rsi14, ctx.thresholds);

        for warning in &signals.warnings {
            ctx.say(format!("DATA-INTEGRITY WARNING: {warning}"));
        }

        // Recent signals
        ctx.say("");
        ctx.say(format!("Signals in the last {RECENT_ROWS} rows"));
        ctx.rule('-', 60);
        let recent_start = n.saturating_sub(RECENT_ROWS);

        let recent_buys: Vec<usize> = signals
            .buy_indices()
            .into_iter()
            .filter(|&i| i >= recent_start)
            .collect();
        let recent_sells: Vec<usize> = signals
            .sell_indices()
            .into_iter()
            .filter(|&i| i >= recent_start)
            .collect();

        if recent_buys.is_empty() {
            ctx.say("Buy signals: none");
        } else {
            ctx.say("Buy signals:");
            for i in recent_buys {
                ctx.say(format!(
                    "  {} - price: ${}, RSI: {}, MACD: {}",
                    dates[i],
                    fmt_val(closes[i]),
                    fmt_val(rsi14[i]),
                    fmt_val4(m.macd[i])
                ));
            }
        }
        if recent_sells.is_empty() {
            ctx.say("Sell signals: none");
        } else {
            ctx.say("Sell signals:");
            for i in recent_sells {
                ctx.say(format!(
                    "  {} - price: ${}, RSI: {}, MACD: {}",
                    dates[i],
                    fmt_val(closes[i]),
                    fmt_val(rsi14[i]),
                    fmt_val4(m.macd[i])
                ));
            }
        }

        // Current status
        let last = n - 1;
        ctx.say("");
        ctx.say("Current status");
        ctx.rule('-', 60);
        ctx.say(format!("Close: ${}", fmt_val(closes[last])));
        ctx.say(format!("RSI(14): {}", fmt_val(rsi14[last])));
        ctx.say(format!("MACD: {}", fmt_val4(m.macd[last])));
        ctx.say(format!("Signal line: {}", fmt_val4(m.signal[last])));
        ctx.say(format!("MA20: ${}", fmt_val(ma20[last])));
        ctx.say(format!("MA50: ${}", fmt_val(ma50[last])));
        ctx.say(format!("MA200: ${}", fmt_val(ma200[last])));
        ctx.say(format!("Bollinger upper: ${}", fmt_val(bands.upper[last])));
        ctx.say(format!("Bollinger middle: ${}", fmt_val(bands.middle[last])));
        ctx.say(format!("Bollinger lower: ${}", fmt_val(bands.lower[last])));

        // Technical assessment
        ctx.say("");
        ctx.say("Technical assessment:");
        let t = ctx.thresholds.clone();
        let last_rsi = rsi14[last];
        if last_rsi.is_nan() {
            ctx.say("  RSI: insufficient history");
        } else if last_rsi < t.rsi_oversold {
            ctx.say("  RSI: oversold (potential buy)");
        } else if last_rsi > t.rsi_overbought {
            ctx.say("  RSI: overbought (potential sell)");
        } else {
            ctx.say(format!("  RSI: neutral ({})", fmt_val(last_rsi)));
        }
        if !m.macd[last].is_nan() && !m.signal[last].is_nan() {
            if m.macd[last] > m.signal[last] {
                ctx.say("  MACD: upward momentum");
            } else {
                ctx.say("  MACD: downward momentum");
            }
        }
        if ma200[last].is_nan() {
            ctx.say("  Trend: MA200 not yet defined");
        } else if closes[last] > ma200[last] {
            ctx.say("  Trend: long-term uptrend (above MA200)");
        } else {
            ctx.say("  Trend: long-term downtrend (below MA200)");
        }

        // Trailing-year recap
        ctx.say("");
        ctx.say("Trailing-year signal recap");
        ctx.rule('-', 60);
        let year_start = n.saturating_sub(YEAR_ROWS);
        let year_buys = signals.buy_indices().iter().filter(|&&i| i >= year_start).count();
        let year_sells = signals.sell_indices().iter().filter(|&&i| i >= year_start).count();
        if year_buys > 0 && year_sells > 0 {
            ctx.say(format!("Buy signals: {year_buys}"));
            ctx.say(format!("Sell signals: {year_sells}"));
            let period_return =
                (closes[last] / closes[year_start] - 1.0) * 100.0;
            ctx.say(format!("Period return: {period_return:.2}%"));
        } else {
            ctx.say("Not enough signals for a recap.");
        }

        // Figure: price+MAs+markers, RSI, MACD, Bollinger
        let buy_idx = signals.buy_indices();
        let sell_idx = signals.sell_indices();
        let buy_dates: Vec<_> = buy_idx.iter().map(|&i| dates[i]).collect();
        let buy_prices: Vec<_> = buy_idx.iter().map(|&i| closes[i]).collect();
        let sell_dates: Vec<_> = sell_idx.iter().map(|&i| dates[i]).collect();
        let sell_prices: Vec<_> = sell_idx.iter().map(|&i| closes[i]).collect();

        let price_panel = Panel::new(
            format!("{} price + moving averages + signals", self.symbol),
            "Price ($)",
        )
        .line("Close", dates, closes)
        .line("MA20", dates, &ma20)
        .line("MA50", dates, &ma50)
        .line("MA200", dates, &ma200)
        .markers(&format!("Buy ({})", buy_idx.len()), &buy_dates, &buy_prices)
        .markers(
            &format!("Sell ({})", sell_idx.len()),
            &sell_dates,
            &sell_prices,
        );

        let rsi_panel = Panel::new("RSI (Relative Strength Index)", "RSI")
            .line("RSI(14)", dates, &rsi14)
            .h_line(t.rsi_overbought)
            .h_line(t.rsi_oversold)
            .y_limits(0.0, 100.0);

        let macd_panel = Panel::new("MACD", "MACD")
            .line("MACD", dates, &m.macd)
            .line("Signal Line", dates, &m.signal)
            .bars("Histogram", dates, &m.histogram)
            .h_line(0.0);

        let bb_panel = Panel::new("Bollinger Bands", "Price ($)")
            .line("Close", dates, closes)
            .line("Upper Band", dates, &bands.upper)
            .line("Middle Band (MA20)", dates, &bands.middle)
            .line("Lower Band", dates, &bands.lower)
            .fill("Band", dates, &bands.upper);

        let mut figure = Figure::new(format!("{} signal analysis", self.symbol));
        figure.push_panel(price_panel);
        figure.push_panel(rsi_panel);
        figure.push_panel(macd_panel);
        figure.push_panel(bb_panel);
        ctx.surface.add(figure);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use marketbrief_core::chart::FigureSurface;
    use marketbrief_core::data::{DataError, DataProvider, SyntheticProvider};
    use marketbrief_core::signals::Thresholds;
    use marketbrief_core::TimeSeries;
    use std::collections::HashMap;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn full_run_produces_four_panel_figure() {
        let provider = SyntheticProvider::new();
        let mut surface = FigureSurface::new();
        let thresholds = Thresholds::default();
        let mut narrative = String::new();
        let mut ctx = ModuleCtx::new(&provider, &mut surface, &thresholds, d("2024-06-28"), &mut narrative);

        let module = StrategyModule::new("strategy_tsla", "TSLA", 5);
        module.run(&mut ctx).unwrap();

        assert_eq!(ctx.surface.open_count(), 1);
        let figures = ctx.surface.drain();
        assert_eq!(figures[0].panels.len(), 4);

        let text = ctx.narrative();
        assert!(text.contains("TSLA buy/sell point analysis"));
        assert!(text.contains("Current status"));
        assert!(text.contains("Technical assessment:"));
        assert!(text.contains("MA200"));
    }

    #[test]
    fn module_id_is_stable() {
        let module = StrategyModule::new("strategy_aapl", "AAPL", 5);
        assert_eq!(module.id(), "strategy_aapl");
    }

    struct ShortProvider;
    impl DataProvider for ShortProvider {
        fn fetch(
            &self,
            symbols: &[&str],
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<HashMap<String, TimeSeries>, DataError> {
            let mut out = HashMap::new();
            // 5 rows: far too short for MA200/RSI, must still not fault
            out.insert(
                symbols[0].to_string(),
                TimeSeries::new(
                    (0..5)
                        .map(|i| d("2024-01-01") + chrono::Duration::days(i))
                        .collect(),
                    vec![100.0, 101.0, 99.0, 102.0, 103.0],
                )
                .unwrap(),
            );
            Ok(out)
        }
    }

    #[test]
    fn short_series_degrades_without_fault() {
        let provider = ShortProvider;
        let mut surface = FigureSurface::new();
        let thresholds = Thresholds::default();
        let mut narrative = String::new();
        let mut ctx = ModuleCtx::new(&provider, &mut surface, &thresholds, d("2024-06-28"), &mut narrative);

        let module = StrategyModule::new("strategy_tsla", "TSLA", 5);
        module.run(&mut ctx).unwrap();

        let text = ctx.narrative();
        assert!(text.contains("RSI(14): n/a"));
        assert!(text.contains("MA200 not yet defined"));
        assert!(text.contains("Not enough signals"));
        // Figure still produced, panels just have sparse series
        assert_eq!(ctx.surface.open_count(), 1);
    }

    struct MissingProvider;
    impl DataProvider for MissingProvider {
        fn fetch(
            &self,
            _symbols: &[&str],
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<HashMap<String, TimeSeries>, DataError> {
            Err(DataError::SymbolNotFound {
                symbol: "TSLA".into(),
            })
        }
    }

    #[test]
    fn missing_symbol_degrades() {
        let provider = MissingProvider;
        let mut surface = FigureSurface::new();
        let thresholds = Thresholds::default();
        let mut narrative = String::new();
        let mut ctx = ModuleCtx::new(&provider, &mut surface, &thresholds, d("2024-06-28"), &mut narrative);

        StrategyModule::new("strategy_tsla", "TSLA", 5)
            .run(&mut ctx)
            .unwrap();
        assert!(ctx.narrative().contains("Data unavailable"));
        assert_eq!(ctx.surface.open_count(), 0);
    }
}
