//! MarketBrief Report — daily analysis orchestration and delivery.
//!
//! This crate builds on `marketbrief-core` to provide:
//! - The analysis module roster (market index, per-symbol strategies,
//!   SCHD vs copper/gold)
//! - A fault-isolating harness with timestamped artifact directories
//! - Consolidated report summaries with per-module snippets
//! - SMTP delivery seam with local-save fallback
//! - Config loading from TOML plus environment overrides

pub mod bundle;
pub mod config;
pub mod delivery;
pub mod harness;
pub mod modules;

pub use bundle::{ModuleEntry, ReportBundle, SUMMARY_SNIPPET_CHARS};
pub use config::{ConfigError, ReportConfig};
pub use delivery::{
    Attachment, DeliveryError, Email, ReportDelivery, SmtpConfig, DEFAULT_EMAIL_TO,
    DEFAULT_SMTP_PORT,
};
pub use harness::{closing_lines, DeliveryStatus, Harness, RunOptions, RunOutcome};
pub use modules::{default_modules, AnalysisModule, ModuleCtx};
