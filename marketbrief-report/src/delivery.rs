//! Report delivery collaborator.
//!
//! The email value types and the `ReportDelivery` seam. An actual SMTP
//! transport is outside this system; anything implementing the trait can be
//! plugged into the harness, and the tests use recording/failing mocks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default recipient when `EMAIL_TO` is not configured.
pub const DEFAULT_EMAIL_TO: &str = "sangyoun.han@outlook.com";

/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("smtp connect failed: {0}")]
    Connect(String),

    #[error("smtp authentication failed: {0}")]
    Auth(String),

    #[error("send failed: {0}")]
    Send(String),
}

/// SMTP credential set. Delivery is attempted only when `is_complete()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SmtpConfig {
    pub server: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl SmtpConfig {
    /// Server, user, and password all present. Port alone is optional and
    /// defaults to 587.
    pub fn is_complete(&self) -> bool {
        self.server.is_some() && self.user.is_some() && self.password.is_some()
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_SMTP_PORT)
    }
}

/// One file attached to the report email.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl Attachment {
    pub fn new(filename: String, bytes: Vec<u8>) -> Self {
        let mime = Self::mime_for(&filename);
        Self {
            filename,
            bytes,
            mime,
        }
    }

    /// Mime type by extension: `.txt` → text/plain, `.png` → image/png,
    /// anything else → application/octet-stream.
    pub fn mime_for(filename: &str) -> &'static str {
        if filename.ends_with(".txt") {
            "text/plain"
        } else if filename.ends_with(".png") {
            "image/png"
        } else {
            "application/octet-stream"
        }
    }
}

/// A composed report email, ready for a transport.
#[derive(Debug, Clone)]
pub struct Email {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: String,
    pub attachments: Vec<Attachment>,
}

/// Transport seam. Implementations must not panic; all transport problems
/// surface as `DeliveryError`.
pub trait ReportDelivery {
    fn send(&self, email: &Email) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smtp_config_completeness() {
        let mut cfg = SmtpConfig::default();
        assert!(!cfg.is_complete());

        cfg.server = Some("smtp.example.com".into());
        cfg.user = Some("bot@example.com".into());
        assert!(!cfg.is_complete());

        cfg.password = Some("hunter2".into());
        assert!(cfg.is_complete());
        assert_eq!(cfg.port_or_default(), 587);
    }

    #[test]
    fn mime_by_extension() {
        assert_eq!(Attachment::mime_for("strategy_tsla.txt"), "text/plain");
        assert_eq!(Attachment::mime_for("strategy_tsla_fig1.png"), "image/png");
        assert_eq!(Attachment::mime_for("data.bin"), "application/octet-stream");
    }
}
