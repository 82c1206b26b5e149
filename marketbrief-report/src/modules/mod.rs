//! Analysis modules.
//!
//! Each module is one independent analysis: it fetches its symbols through
//! the data-provider collaborator, derives indicators/signals, writes a
//! narrative into the module context, and pushes figures onto the figure
//! surface. Modules tolerate missing data by degrading (diagnostic line,
//! possibly no figure) rather than failing; the harness treats any `Err`
//! or panic as that module's fault.

pub mod market_index;
pub mod schd_copper_gold;
pub mod strategy;

pub use market_index::MarketIndexModule;
pub use schd_copper_gold::SchdCopperGoldModule;
pub use strategy::StrategyModule;

use chrono::NaiveDate;
use marketbrief_core::chart::FigureSurface;
use marketbrief_core::data::DataProvider;
use marketbrief_core::signals::Thresholds;

/// Everything a module needs for one run.
///
/// The narrative buffer is borrowed from the harness, so text written
/// before a fault survives the fault.
pub struct ModuleCtx<'a> {
    pub provider: &'a dyn DataProvider,
    pub surface: &'a mut FigureSurface,
    pub thresholds: &'a Thresholds,
    /// End of every module's analysis window (normally the wall-clock date;
    /// fixed in tests for determinism).
    pub today: NaiveDate,
    narrative: &'a mut String,
}

impl<'a> ModuleCtx<'a> {
    pub fn new(
        provider: &'a dyn DataProvider,
        surface: &'a mut FigureSurface,
        thresholds: &'a Thresholds,
        today: NaiveDate,
        narrative: &'a mut String,
    ) -> Self {
        Self {
            provider,
            surface,
            thresholds,
            today,
            narrative,
        }
    }

    /// Append one narrative line.
    pub fn say(&mut self, line: impl AsRef<str>) {
        self.narrative.push_str(line.as_ref());
        self.narrative.push('\n');
    }

    /// Append a section rule of `=` or `-`.
    pub fn rule(&mut self, ch: char, width: usize) {
        self.narrative.extend(std::iter::repeat(ch).take(width));
        self.narrative.push('\n');
    }

    pub fn narrative(&self) -> &str {
        self.narrative
    }
}

/// One registered analysis.
pub trait AnalysisModule {
    /// Stable identifier used for artifact names (`<id>.txt`, `<id>_figN.png`).
    fn id(&self) -> &str;

    fn run(&self, ctx: &mut ModuleCtx) -> anyhow::Result<()>;
}

/// The configured module sequence, in fixed execution order.
pub fn default_modules() -> Vec<Box<dyn AnalysisModule>> {
    vec![
        Box::new(MarketIndexModule),
        Box::new(StrategyModule::new("strategy_aapl", "AAPL", 5)),
        Box::new(StrategyModule::new("strategy_tsla", "TSLA", 5)),
        Box::new(SchdCopperGoldModule),
    ]
}

/// Format a possibly-NaN value to two decimals, "n/a" when undefined.
pub(crate) fn fmt_val(v: f64) -> String {
    if v.is_nan() {
        "n/a".to_string()
    } else {
        format!("{v:.2}")
    }
}

/// Same, four decimals (ratios, MACD values).
pub(crate) fn fmt_val4(v: f64) -> String {
    if v.is_nan() {
        "n/a".to_string()
    } else {
        format!("{v:.4}")
    }
}
