//! Report harness — runs every analysis module under fault isolation,
//! persists artifacts to a timestamped directory, and hands the bundle
//! to the delivery layer.
//!
//! One faulting module never takes down the run: its panic or error is
//! captured into that module's artifact and the remaining modules still
//! execute. Only failure to create the output directory is fatal.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use marketbrief_core::chart::{FigureRenderer, FigureSurface};
use marketbrief_core::data::DataProvider;

use crate::bundle::{ModuleEntry, ReportBundle};
use crate::config::ReportConfig;
use crate::delivery::{Attachment, Email, ReportDelivery};
use crate::modules::{AnalysisModule, ModuleCtx};

/// What happened to email delivery at the end of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// SMTP credentials were incomplete (or no transport was supplied);
    /// artifacts were saved locally only.
    Skipped,
    Sent { to: String },
    Failed { error: String },
}

/// Result of one full report run.
#[derive(Debug)]
pub struct RunOutcome {
    pub outdir: PathBuf,
    pub bundle: ReportBundle,
    pub delivery: DeliveryStatus,
}

/// Run parameters fixed at the moment the harness starts.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub today: NaiveDate,
    /// Directory- and subject-naming timestamp, `%Y%m%d_%H%M%S`.
    pub timestamp: String,
}

impl RunOptions {
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            today: now.date_naive(),
            timestamp: now.format("%Y%m%d_%H%M%S").to_string(),
        }
    }
}

pub struct Harness<'a> {
    config: &'a ReportConfig,
    provider: &'a dyn DataProvider,
    renderer: &'a dyn FigureRenderer,
    delivery: Option<&'a dyn ReportDelivery>,
}

impl<'a> Harness<'a> {
    pub fn new(
        config: &'a ReportConfig,
        provider: &'a dyn DataProvider,
        renderer: &'a dyn FigureRenderer,
        delivery: Option<&'a dyn ReportDelivery>,
    ) -> Self {
        Self {
            config,
            provider,
            renderer,
            delivery,
        }
    }

    /// Execute `modules` in order, persist all artifacts, then attempt
    /// delivery. Returns `Err` only if the output directory cannot be
    /// created or an artifact cannot be written.
    pub fn run(&self, modules: &[Box<dyn AnalysisModule>], opts: &RunOptions) -> Result<RunOutcome> {
        let outdir = PathBuf::from(&self.config.output_dir).join(&opts.timestamp);
        fs::create_dir_all(&outdir)
            .with_context(|| format!("failed to create output directory {}", outdir.display()))?;

        let mut entries = Vec::with_capacity(modules.len());
        for module in modules {
            let entry = self.run_one(module.as_ref(), opts, &outdir)?;
            entries.push(entry);
        }

        let bundle = ReportBundle {
            timestamp: opts.timestamp.clone(),
            entries,
        };

        let summary = bundle.compose_summary();
        let summary_path = outdir.join("report_summary.txt");
        fs::write(&summary_path, &summary)
            .with_context(|| format!("failed to write {}", summary_path.display()))?;

        let delivery = self.deliver(&bundle, &summary);
        self.print_closing(&delivery, &outdir);

        Ok(RunOutcome {
            outdir,
            bundle,
            delivery,
        })
    }

    /// Run a single module with panic isolation, render its figures, and
    /// write its text artifact.
    fn run_one(
        &self,
        module: &dyn AnalysisModule,
        opts: &RunOptions,
        outdir: &std::path::Path,
    ) -> Result<ModuleEntry> {
        let id = module.id().to_string();
        println!("Running module: {id}");

        let mut narrative = String::new();
        let mut surface = FigureSurface::new();
        let mut stderr = String::new();
        let mut failed = false;

        // Narrative and figures live outside the unwind boundary so
        // partial output survives a panic.
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut ctx = ModuleCtx::new(
                self.provider,
                &mut surface,
                &self.config.thresholds,
                opts.today,
                &mut narrative,
            );
            module.run(&mut ctx)
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                failed = true;
                stderr.push_str(&format!("module fault: {e:#}\n"));
            }
            Err(payload) => {
                failed = true;
                let msg = panic_message(payload.as_ref());
                stderr.push_str(&format!("module panicked: {msg}\n"));
            }
        }

        // Figures are flushed even when the module faulted; a render
        // error is recorded in the artifact rather than aborting the run.
        let mut figure_paths = Vec::new();
        for (n, figure) in surface.drain().iter().enumerate() {
            let path = outdir.join(format!("{id}_fig{}.png", n + 1));
            match self.renderer.render(figure, &path) {
                Ok(()) => figure_paths.push(path),
                Err(e) => stderr.push_str(&format!(
                    "failed to render figure {}: {e}\n",
                    path.display()
                )),
            }
        }
        surface.close_all();

        let text = format!("--- STDOUT ---\n{narrative}\n--- STDERR ---\n{stderr}");
        let text_path = outdir.join(format!("{id}.txt"));
        fs::write(&text_path, &text)
            .with_context(|| format!("failed to write {}", text_path.display()))?;

        Ok(ModuleEntry {
            id,
            text,
            figure_paths,
            failed,
        })
    }

    /// Send the report by email if SMTP is fully configured, otherwise
    /// leave the artifacts on disk and say where they are.
    fn deliver(&self, bundle: &ReportBundle, summary: &str) -> DeliveryStatus {
        let (Some(transport), true) = (self.delivery, self.config.smtp.is_complete()) else {
            return DeliveryStatus::Skipped;
        };

        let mut attachments = Vec::new();
        for entry in &bundle.entries {
            attachments.push(Attachment::new(
                format!("{}.txt", entry.id),
                entry.text.clone().into_bytes(),
            ));
        }
        for path in bundle.figure_paths() {
            match fs::read(&path) {
                Ok(bytes) => {
                    let filename = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "figure.png".to_string());
                    attachments.push(Attachment::new(filename, bytes));
                }
                Err(e) => eprintln!("skipping attachment {}: {e}", path.display()),
            }
        }

        let email = Email {
            subject: bundle.subject(),
            body: summary.to_string(),
            // `is_complete()` guarantees an SMTP user, so a sender exists.
            from: self.config.sender().unwrap_or_default(),
            to: self.config.email_to.clone(),
            attachments,
        };

        match transport.send(&email) {
            Ok(()) => DeliveryStatus::Sent {
                to: email.to.clone(),
            },
            Err(e) => {
                eprintln!("Failed to send email: {e}");
                DeliveryStatus::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn print_closing(&self, delivery: &DeliveryStatus, outdir: &std::path::Path) {
        for line in closing_lines(delivery, outdir) {
            println!("{line}");
        }
    }
}

/// End-of-run status lines. Whenever the report was not emailed — delivery
/// skipped or failed — these include the configuration guidance and the
/// artifact location.
pub fn closing_lines(delivery: &DeliveryStatus, outdir: &std::path::Path) -> Vec<String> {
    let mut lines = Vec::new();
    match delivery {
        DeliveryStatus::Sent { to } => {
            lines.push(format!("Report emailed to {to}"));
        }
        DeliveryStatus::Skipped => {
            lines.push(format!(
                "Email not configured; report saved to {}",
                outdir.display()
            ));
        }
        DeliveryStatus::Failed { error } => {
            lines.push(format!(
                "Delivery failed ({error}); report saved to {}",
                outdir.display()
            ));
        }
    }
    if !matches!(delivery, DeliveryStatus::Sent { .. }) {
        lines.push(
            "Set SMTP_SERVER, SMTP_PORT, SMTP_USER and SMTP_PASSWORD \
             (optionally EMAIL_FROM and EMAIL_TO) to enable delivery."
                .to_string(),
        );
    }
    lines.push("Done.".to_string());
    lines
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
