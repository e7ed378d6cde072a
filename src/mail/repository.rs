use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::message::OutgoingMail;

/// Mail delivery errors; none are retried
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail provider responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Mail token error: {0}")]
    Token(String),

    #[error("Invalid mail provider URL: {0}")]
    InvalidUrl(String),
}

/// Result type for mail operations
pub type MailResult<T> = Result<T, MailError>;

/// What happened to a mail handed to [`MailRepository::send`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendStatus {
    /// Accepted by the provider
    Sent,
    /// Recipient is on the blocklist; nothing was sent
    Blocked,
}

/// Sends composed mails.
///
/// Implementations are shared across concurrent requests and must not keep
/// per-call state.
#[async_trait]
pub trait MailRepository: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> MailResult<SendStatus>;
}
