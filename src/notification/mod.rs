//! Malfunction Notifications
//!
//! Routing policy, message composition and a caller-owned FIFO of pending
//! notices. Nothing here talks to a mail server: the queue is drained by
//! whatever delivery layer the caller plugs in.
//!
//! ## Routing
//!
//! A prediction maps to an [`AlertCategory`] through its component and to an
//! [`AlertSeverity`] through its risk bucket. [`should_notify`] then applies
//! the operator's [`NotificationSettings`].

use std::collections::VecDeque;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub use crate::config::NotificationSettings;
use crate::types::{AlertCategory, AlertSeverity, Component};

// ============================================================================
// Address Validation
// ============================================================================

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Loose shape check: `something@something.something`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let pattern = EMAIL_PATTERN.get_or_init(|| match Regex::new(r"^\S+@\S+\.\S+$") {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(error = %e, "Email pattern failed to compile");
            None
        }
    });
    pattern.as_ref().is_some_and(|re| re.is_match(email))
}

// ============================================================================
// Routing Policy
// ============================================================================

/// Whether an alert of this category and severity passes the operator's opt-ins.
pub fn should_notify(category: AlertCategory, severity: AlertSeverity, settings: &NotificationSettings) -> bool {
    if settings.critical_only && severity != AlertSeverity::Critical {
        return false;
    }
    match category {
        AlertCategory::Sound => settings.sound_alerts,
        AlertCategory::Temperature => settings.temperature_alerts,
        AlertCategory::Vibration => settings.vibration_alerts,
        AlertCategory::Hydraulic => settings.hydraulic_alerts,
    }
}

// ============================================================================
// Notice Composition
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Invalid recipient email address: '{0}'")]
    InvalidEmail(String),
}

/// A composed malfunction alert, ready for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct MalfunctionNotice {
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl MalfunctionNotice {
    /// Compose a notice for `component`, stamped with the current UTC time.
    pub fn new(
        email: &str,
        component: Component,
        details: &str,
        severity: AlertSeverity,
    ) -> Result<Self, NotificationError> {
        Self::at(email, component, details, severity, Utc::now())
    }

    /// Compose a notice with an explicit detection time.
    pub fn at(
        email: &str,
        component: Component,
        details: &str,
        severity: AlertSeverity,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, NotificationError> {
        let email = checked_email(email)?;
        let subject = format!("[{severity}] Drilling equipment fault alert: {component}");
        let message = format!(
            "A malfunction has been detected in the drilling equipment.\n\n\
             Component: {component}\n\
             Details: {details}\n\
             Severity: {severity}\n\
             Detected at: {}\n\n\
             Inspect the equipment and take action as required.",
            timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        );
        Ok(Self { email, subject, message, timestamp })
    }

    /// Connectivity check notice sent from the CLI.
    pub fn test(email: &str) -> Result<Self, NotificationError> {
        let email = checked_email(email)?;
        Ok(Self {
            email,
            subject: "Test notification from the top drive monitor".to_string(),
            message: "This is a test notification. If you received it, alert delivery is configured correctly."
                .to_string(),
            timestamp: Utc::now(),
        })
    }
}

fn checked_email(email: &str) -> Result<String, NotificationError> {
    let trimmed = email.trim();
    if is_valid_email(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(NotificationError::InvalidEmail(email.to_string()))
    }
}

// ============================================================================
// Queue
// ============================================================================

/// Pending notices in arrival order.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: VecDeque<MalfunctionNotice>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: MalfunctionNotice) {
        info!(to = %notice.email, subject = %notice.subject, "Notification queued");
        self.pending.push_back(notice);
    }

    /// Remove and return every pending notice, oldest first.
    pub fn drain(&mut self) -> Vec<MalfunctionNotice> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
