//! Market index comparison — normalized 10-year macro panel.
//!
//! Copper/gold ratio (economy), 10-year treasury yield (cost of money),
//! S&P 500 (market), and AAPL/DJI ratio, all rebased to 100 at the start of
//! the common window and drawn on a single panel.

use super::{AnalysisModule, ModuleCtx};
use chrono::Duration;
use marketbrief_core::chart::{Figure, Panel};
use marketbrief_core::Frame;

const SYMBOLS: [&str; 6] = ["HG=F", "GC=F", "^TNX", "^GSPC", "AAPL", "^DJI"];
const LOOKBACK_YEARS: i64 = 10;

pub struct MarketIndexModule;

impl AnalysisModule for MarketIndexModule {
    fn id(&self) -> &str {
        "market_index"
    }

    fn run(&self, ctx: &mut ModuleCtx) -> anyhow::Result<()> {
        let end = ctx.today;
        let start = end - Duration::days(365 * LOOKBACK_YEARS);

        ctx.say("Normalized market comparison (10-year trend, base=100)");
        ctx.rule('=', 60);
        ctx.say(format!("Window: {start} ~ {end}"));

        let data = match ctx.provider.fetch(&SYMBOLS, start, end) {
            Ok(data) => data,
            Err(e) => {
                ctx.say(format!("Data unavailable: {e}"));
                return Ok(());
            }
        };

        let series: Vec<(&str, _)> = SYMBOLS
            .iter()
            .filter_map(|&s| data.get(s).map(|ts| (s, ts)))
            .collect();
        let mut frame = Frame::join(&series);
        if frame.is_empty() {
            ctx.say("No complete rows across all symbols; nothing to compare.");
            return Ok(());
        }
        frame.add_ratio("Cu/Au Ratio", "HG=F", "GC=F")?;
        frame.add_ratio("AAPL/DJI Ratio", "AAPL", "^DJI")?;

        let indexed = frame.rebase_100(0)?;
        ctx.say(format!(
            "Aligned rows: {} ({} ~ {})",
            indexed.len(),
            indexed.dates()[0],
            indexed.dates()[indexed.len() - 1]
        ));

        for (name, label) in [
            ("Cu/Au Ratio", "Copper/Gold ratio (economy)"),
            ("^TNX", "10Y treasury yield (cost)"),
            ("^GSPC", "S&P 500 (market)"),
            ("AAPL/DJI Ratio", "AAPL/DJI ratio"),
        ] {
            let col = indexed.column(name)?;
            ctx.say(format!("{label}: index {:.2}", col[col.len() - 1]));
        }

        let mut panel = Panel::new("Normalized comparison (base=100)", "Performance index")
            .h_line(100.0);
        for (name, label) in [
            ("Cu/Au Ratio", "Copper/Gold Ratio (Economy)"),
            ("^TNX", "10Y Treasury Yield (Cost)"),
            ("^GSPC", "S&P 500 (Market)"),
            ("AAPL/DJI Ratio", "AAPL/DJI Ratio"),
        ] {
            panel = panel.line(label, indexed.dates(), indexed.column(name)?);
        }

        let mut figure = Figure::new("Normalized Comparison (10-Year Trend, Base=100)");
        figure.push_panel(panel);
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
    fn produces_one_figure_with_four_lines() {
        let provider = SyntheticProvider::new();
        let mut surface = FigureSurface::new();
        let thresholds = Thresholds::default();
        let mut narrative = String::new();
        let mut ctx = ModuleCtx::new(&provider, &mut surface, &thresholds, d("2024-06-28"), &mut narrative);

        MarketIndexModule.run(&mut ctx).unwrap();

        assert_eq!(ctx.surface.open_count(), 1);
        let figures = ctx.surface.drain();
        assert_eq!(figures[0].panels.len(), 1);
        assert_eq!(figures[0].panels[0].series.len(), 4);
        assert!(ctx.narrative().contains("Normalized market comparison"));
    }

    struct FailingProvider;
    impl DataProvider for FailingProvider {
        fn fetch(
            &self,
            _symbols: &[&str],
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<HashMap<String, TimeSeries>, DataError> {
            Err(DataError::SymbolNotFound {
                symbol: "HG=F".into(),
            })
        }
    }

    #[test]
    fn degrades_on_data_fault() {
        let provider = FailingProvider;
        let mut surface = FigureSurface::new();
        let thresholds = Thresholds::default();
        let mut narrative = String::new();
        let mut ctx = ModuleCtx::new(&provider, &mut surface, &thresholds, d("2024-06-28"), &mut narrative);

        MarketIndexModule.run(&mut ctx).unwrap();

        assert_eq!(ctx.surface.open_count(), 0);
        assert!(ctx.narrative().contains("Data unavailable"));
    }

    struct DisjointProvider;
    impl DataProvider for DisjointProvider {
        fn fetch(
            &self,
            symbols: &[&str],
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<HashMap<String, TimeSeries>, DataError> {
            // Every symbol trades on a different day: inner join is empty.
            let mut out = HashMap::new();
            for (i, &s) in symbols.iter().enumerate() {
                let date = d("2024-01-01") + chrono::Duration::days(i as i64);
                out.insert(
                    s.to_string(),
                    TimeSeries::new(vec![date], vec![100.0]).unwrap(),
                );
            }
            Ok(out)
        }
    }

    #[test]
    fn reports_empty_join() {
        let provider = DisjointProvider;
        let mut surface = FigureSurface::new();
        let thresholds = Thresholds::default();
        let mut narrative = String::new();
        let mut ctx = ModuleCtx::new(&provider, &mut surface, &thresholds, d("2024-06-28"), &mut narrative);

        MarketIndexModule.run(&mut ctx).unwrap();
        assert!(ctx.narrative().contains("No complete rows"));
        assert_eq!(ctx.surface.open_count(), 0);
    }
}
