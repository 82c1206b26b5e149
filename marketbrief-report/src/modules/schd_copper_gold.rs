//! SCHD vs copper/gold ratio — dividend equity against an economic proxy.
//!
//! Ten-year comparison of the SCHD dividend ETF with the copper/gold price
//! ratio: summary statistics, full-series and 60-day rolling correlation,
//! MA50/200 trend read, and valuation buckets against MA200.

use super::{fmt_val, fmt_val4, AnalysisModule, ModuleCtx};
use chrono::Duration;
use marketbrief_core::chart::{Figure, Panel};
use marketbrief_core::indicators::{pearson, rolling_correlation, sma};
use marketbrief_core::Frame;

const LOOKBACK_YEARS: i64 = 10;
const ROLLING_CORR_WINDOW: usize = 60;

pub struct SchdCopperGoldModule;

impl AnalysisModule for SchdCopperGoldModule {
    fn id(&self) -> &str {
        "schd_copper_gold"
    }

    fn run(&self, ctx: &mut ModuleCtx) -> anyhow::Result<()> {
        let end = ctx.today;
        let start = end - Duration::days(365 * LOOKBACK_YEARS);

        ctx.say("SCHD price vs copper/gold ratio");
        ctx.rule('=', 70);
        ctx.say(format!("Window: {start} ~ {end}"));
        ctx.rule('=', 70);

        let data = match ctx.provider.fetch(&["SCHD", "HG=F", "GC=F"], start, end) {
            Ok(data) => data,
            Err(e) => {
                ctx.say(format!("Data unavailable: {e}"));
                return Ok(());
            }
        };
        let series: Vec<(&str, _)> = [("SCHD", "SCHD"), ("Copper", "HG=F"), ("Gold", "GC=F")]
            .iter()
            .filter_map(|&(name, sym)| data.get(sym).map(|ts| (name, ts)))
            .collect();
        let mut frame = Frame::join(&series);
        if frame.is_empty() {
            ctx.say("No complete rows across SCHD/copper/gold; nothing to analyze.");
            return Ok(());
        }
        frame.add_ratio("Cu/Au Ratio", "Copper", "Gold")?;

        let dates = frame.dates().to_vec();
        let schd = frame.column("SCHD")?.to_vec();
        let copper = frame.column("Copper")?.to_vec();
        let gold = frame.column("Gold")?.to_vec();
        let ratio = frame.column("Cu/Au Ratio")?.to_vec();
        let n = schd.len();
        let last = n - 1;

        // Statistics
        ctx.say("");
        ctx.say("Statistics");
        ctx.rule('-', 70);
        ctx.say(format!(
            "SCHD return: {:.2}%",
            (schd[last] / schd[0] - 1.0) * 100.0
        ));
        ctx.say(format!(
            "Cu/Au ratio change: {:.2}%",
            (ratio[last] / ratio[0] - 1.0) * 100.0
        ));

        let (max_i, max_v) = argmax(&schd);
        let (min_i, min_v) = argmin(&schd);
        let mean = schd.iter().sum::<f64>() / n as f64;
        let stddev = sample_stddev(&schd, mean);
        ctx.say(format!("SCHD high: ${} ({})", fmt_val(max_v), dates[max_i]));
        ctx.say(format!("SCHD low: ${} ({})", fmt_val(min_v), dates[min_i]));
        ctx.say(format!("SCHD mean: ${}", fmt_val(mean)));
        ctx.say(format!("SCHD stddev: ${}", fmt_val(stddev)));

        // Correlation
        let correlation = pearson(&schd, &ratio);
        let band = ctx.thresholds.correlation_band;
        ctx.say("");
        ctx.say(format!(
            "SCHD vs Cu/Au correlation: {}",
            fmt_val4(correlation)
        ));
        if correlation > band {
            ctx.say("  -> positive correlation (move together)");
        } else if correlation < -band {
            ctx.say("  -> negative correlation (move apart)");
        } else {
            ctx.say("  -> weak correlation (independent)");
        }

        // Latest state
        let indexed = frame.rebase_100(0)?;
        ctx.say("");
        ctx.say("Latest state (last trading day)");
        ctx.rule('-', 70);
        ctx.say(format!(
            "SCHD close: ${} (index {})",
            fmt_val(schd[last]),
            fmt_val(indexed.column("SCHD")?[last])
        ));
        ctx.say(format!("Copper: ${}", fmt_val(copper[last])));
        ctx.say(format!("Gold: ${}", fmt_val(gold[last])));
        ctx.say(format!("Cu/Au ratio: {}", fmt_val4(ratio[last])));

        // Trend read
        let ma50 = sma(&schd, 50);
        let ma200 = sma(&schd, 200);
        ctx.say("");
        ctx.say("Trend read:");
        if ma200[last].is_nan() || ma50[last].is_nan() {
            ctx.say("  -> insufficient history for MA50/MA200");
        } else if schd[last] > ma50[last] && ma50[last] > ma200[last] {
            ctx.say("  -> strong uptrend (close > MA50 > MA200)");
        } else if schd[last] > ma200[last] {
            ctx.say("  -> uptrend (close > MA200)");
        } else {
            ctx.say("  -> downtrend or weakness");
        }

        // Insights
        ctx.say("");
        ctx.say("Insights");
        ctx.rule('-', 70);
        let ratio_mean = ratio.iter().sum::<f64>() / n as f64;
        if ratio[last] > ratio_mean {
            ctx.say("Cu/Au ratio above its long-run mean");
            ctx.say("  -> economy comparatively strong (copper demand up)");
            ctx.say("  -> supportive for dividend equity (SCHD)");
        } else {
            ctx.say("Cu/Au ratio below its long-run mean");
            ctx.say("  -> economy softening (gold preference rising)");
            ctx.say("  -> dividend payout pressure possible");
        }

        let dev_band = ctx.thresholds.ma200_deviation_pct;
        ctx.say("");
        ctx.say("SCHD valuation:");
        if ma200[last].is_nan() {
            ctx.say("  -> MA200 not yet defined");
        } else {
            let deviation = (schd[last] / ma200[last] - 1.0) * 100.0;
            if deviation > dev_band {
                ctx.say(format!("  -> stretched (MA200 {deviation:+.1}%)"));
                ctx.say("  -> consider selling or waiting");
            } else if deviation < -dev_band {
                ctx.say(format!("  -> depressed (MA200 {deviation:+.1}%)"));
                ctx.say("  -> potential buying opportunity");
            } else {
                ctx.say(format!("  -> normal range (MA200 {deviation:+.1}%)"));
                ctx.say("  -> regular accumulation");
            }
        }

        ctx.say("");
        ctx.say("Combined verdict:");
        let uptrend = !ma200[last].is_nan() && schd[last] > ma200[last];
        if correlation > band && ratio[last] > ratio_mean && uptrend {
            ctx.say("  positive: economic strength + uptrend -> accumulate");
        } else if correlation < -band && ratio[last] < ratio_mean {
            ctx.say("  caution: economic weakness signals -> review exposure");
        } else {
            ctx.say("  neutral: mixed signals -> keep watching");
        }
        ctx.rule('=', 70);

        // Figure: price+MAs, indexed comparison, rolling correlation
        let rolling = rolling_correlation(&schd, &ratio, ROLLING_CORR_WINDOW);

        let price_panel = Panel::new("SCHD price", "Price ($)")
            .line("SCHD Price", &dates, &schd)
            .line("MA50", &dates, &ma50)
            .line("MA200", &dates, &ma200)
            .fill("Above MA200", &dates, &ma200);

        let indexed_panel = Panel::new("SCHD vs Cu/Au ratio (base=100)", "Index")
            .line("SCHD (Index)", &dates, indexed.column("SCHD")?)
            .line("Copper/Gold Ratio (Index)", &dates, indexed.column("Cu/Au Ratio")?)
            .h_line(100.0);

        let corr_panel = Panel::new(
            format!("{ROLLING_CORR_WINDOW}-day rolling correlation"),
            "Correlation",
        )
        .line(
            &format!("{ROLLING_CORR_WINDOW}-Day Rolling Correlation"),
            &dates,
            &rolling,
        )
        .fill("Correlation", &dates, &rolling)
        .h_line(0.0)
        .y_limits(-1.0, 1.0);

        let mut figure = Figure::new("SCHD vs Copper/Gold");
        figure.push_panel(price_panel);
        figure.push_panel(indexed_panel);
        figure.push_panel(corr_panel);
        ctx.surface.add(figure);

        Ok(())
    }
}

fn argmax(values: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &v) in values.iter().enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}

fn argmin(values: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, &v) in values.iter().enumerate() {
        if v < best.1 {
            best = (i, v);
        }
    }
    best
}

fn sample_stddev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / (values.len() as f64 - 1.0)).sqrt()
}
