use serde::Serialize;
use thiserror::Error;

use crate::incident::{Language, Person};
use crate::template::TemplateParams;

/// The three decision procedures exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Lifecycle update, mailed to the reporter
    Update,
    /// Urgency alert, mailed to the assignee
    Alert,
    /// Risk level change, mailed to the assignee
    RiskChange,
}

/// Why the engine decided not to send anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// The reporter created the incident by mail and already has it
    EmailChannelCreation,
    /// Risk-change event without a risk level
    NoRisk,
    /// The latest action has no notification attached
    UnhandledAction,
}

/// A mail the engine decided to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: Person,
    pub subject: String,
    pub template_name: &'static str,
    pub language: Language,
    pub params: TemplateParams,
}

/// Result of running a route's decision procedure against an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Suppressed(SuppressReason),
    Send(Notification),
}

impl NotificationOutcome {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, NotificationOutcome::Suppressed(_))
    }

    pub fn notification(&self) -> Option<&Notification> {
        match self {
            NotificationOutcome::Send(notification) => Some(notification),
            NotificationOutcome::Suppressed(_) => None,
        }
    }
}

/// Failures of the decision engine; all are fatal for the request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("History integrity error: {0}")]
    HistoryIntegrity(String),

    #[error("Invalid client incidents email: {0}")]
    InvalidClientEmail(String),
}
