//! Report run configuration.
//!
//! Layered: built-in defaults, then an optional TOML file, then environment
//! variables (env wins). The env surface mirrors the scheduled-job
//! deployment this pipeline is meant for:
//! `REPORT_OUTPUT_DIR`, `REPORT_DATA_DIR`, `SMTP_SERVER`, `SMTP_PORT`,
//! `SMTP_USER`, `SMTP_PASSWORD`, `EMAIL_TO`, `EMAIL_FROM`.

use crate::delivery::{SmtpConfig, DEFAULT_EMAIL_TO};
use marketbrief_core::signals::Thresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid SMTP_PORT '{0}'")]
    BadPort(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory that receives one timestamped subdirectory per run.
    pub output_dir: PathBuf,
    /// Directory holding per-symbol CSV files.
    pub data_dir: PathBuf,
    /// Fall back to synthetic series when CSV data is missing.
    pub synthetic: bool,
    pub smtp: SmtpConfig,
    /// Recipient; falls back to the built-in default address.
    pub email_to: String,
    /// Sender; defaults to the SMTP user when unset.
    pub email_from: Option<String>,
    pub thresholds: Thresholds,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            data_dir: PathBuf::from("data"),
            synthetic: false,
            smtp: SmtpConfig::default(),
            email_to: DEFAULT_EMAIL_TO.to_string(),
            email_from: None,
            thresholds: Thresholds::default(),
        }
    }
}

impl ReportConfig {
    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Overlay recognized environment variables onto this config.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(v) = std::env::var("REPORT_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("REPORT_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("SMTP_SERVER") {
            self.smtp.server = Some(v);
        }
        if let Ok(v) = std::env::var("SMTP_PORT") {
            let port: u16 = v.parse().map_err(|_| ConfigError::BadPort(v))?;
            self.smtp.port = Some(port);
        }
        if let Ok(v) = std::env::var("SMTP_USER") {
            self.smtp.user = Some(v);
        }
        if let Ok(v) = std::env::var("SMTP_PASSWORD") {
            self.smtp.password = Some(v);
        }
        if let Ok(v) = std::env::var("EMAIL_TO") {
            self.email_to = v;
        }
        if let Ok(v) = std::env::var("EMAIL_FROM") {
            self.email_from = Some(v);
        }
        Ok(())
    }

    /// Sender address: explicit `email_from`, else the SMTP user.
    pub fn sender(&self) -> Option<String> {
        self.email_from
            .clone()
            .or_else(|| self.smtp.user.clone())
    }
}
