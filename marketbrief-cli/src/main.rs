//! MarketBrief CLI — daily report generation and offline data management.
//!
//! Commands:
//! - `report` — run every analysis module, save artifacts to a timestamped
//!   directory, and email the summary when SMTP is configured
//! - `fetch` — materialize synthetic price history as per-symbol CSV files
//!   so `report` can run fully offline

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use marketbrief_core::chart::SpecRenderer;
use marketbrief_core::data::{export_csv, CsvProvider, DataProvider, SyntheticProvider};
use marketbrief_report::harness::{Harness, RunOptions};
use marketbrief_report::modules::default_modules;
use marketbrief_report::ReportConfig;

#[derive(Parser)]
#[command(
    name = "marketbrief",
    about = "MarketBrief CLI — daily market analysis reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daily analysis report.
    Report {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory. Overrides config and REPORT_OUTPUT_DIR.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Data directory with per-symbol CSV files.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Use deterministic synthetic data instead of CSV files.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Write synthetic price history as per-symbol CSV files.
    Fetch {
        /// Symbols to materialize (e.g., AAPL TSLA SCHD HG=F).
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Start date (YYYY-MM-DD). Defaults to 10 years ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Data directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            config,
            output_dir,
            data_dir,
            synthetic,
        } => run_report(config, output_dir, data_dir, synthetic),
        Commands::Fetch {
            symbols,
            start,
            end,
            data_dir,
        } => run_fetch(symbols, start, end, data_dir),
    }
}

fn run_report(
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    synthetic: bool,
) -> Result<()> {
    let mut config = ReportConfig::load(config_path.as_deref())?;
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if synthetic {
        config.synthetic = true;
    }

    let synthetic_provider = SyntheticProvider::new();
    let csv_provider = CsvProvider::new(&config.data_dir);
    let provider: &dyn DataProvider = if config.synthetic {
        &synthetic_provider
    } else {
        &csv_provider
    };

    let renderer = SpecRenderer;
    // No SMTP transport is compiled in; delivery is skipped and artifacts
    // are saved locally.
    let harness = Harness::new(&config, provider, &renderer, None);
    let outcome = harness.run(&default_modules(), &RunOptions::now())?;

    let faulted = outcome.bundle.entries.iter().filter(|e| e.failed).count();
    if faulted > 0 {
        eprintln!("{faulted} module(s) faulted; see artifacts for details");
    }
    Ok(())
}

fn run_fetch(
    symbols: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    data_dir: PathBuf,
) -> Result<()> {
    let end_date = end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let start_date = start
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| end_date - chrono::Duration::days(365 * 10));

    for symbol in &symbols {
        let series = SyntheticProvider::generate(symbol, start_date, end_date);
        let path = export_csv(&data_dir, symbol, &series)?;
        println!("{symbol}: {} rows -> {}", series.len(), path.display());
    }
    Ok(())
}
