// Async client for the SendGrid v3 mail API.
//
// Endpoint: POST /v3/mail/send
// Auth: optional `Authorization: Bearer <token>` from a TokenProvider

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Url;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SendgridConfig;

use super::message::{OutgoingMail, SendgridMessage};
use super::repository::{MailError, MailRepository, MailResult, SendStatus};
use super::token::TokenProvider;

pub const SENDGRID_SEND_PATH: &str = "/v3/mail/send";

/// SendGrid-backed [`MailRepository`].
///
/// Built once at startup and shared by every request handler.
pub struct SendgridMailRepository {
    http: reqwest::Client,
    send_url: Url,
    token_provider: Option<Arc<dyn TokenProvider>>,
    blocklist: HashSet<String>,
}

impl SendgridMailRepository {
    /// Build from configuration; the HTTP client enforces the configured timeout.
    pub fn new(
        config: &SendgridConfig,
        token_provider: Option<Arc<dyn TokenProvider>>,
    ) -> MailResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Self::with_client(
            http,
            &config.base_url,
            token_provider,
            config.blocklist.iter().cloned(),
        )
    }

    /// Wrap an existing `reqwest::Client`
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        token_provider: Option<Arc<dyn TokenProvider>>,
        blocklist: impl IntoIterator<Item = String>,
    ) -> MailResult<Self> {
        let send_url = Url::parse(base_url)
            .and_then(|base| base.join(SENDGRID_SEND_PATH))
            .map_err(|e| MailError::InvalidUrl(format!("{base_url}: {e}")))?;

        let blocklist = blocklist
            .into_iter()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();

        Ok(Self {
            http,
            send_url,
            token_provider,
            blocklist,
        })
    }

    pub fn send_url(&self) -> &Url {
        &self.send_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token_provider.is_some()
    }

    /// Whether mail to `email` must be dropped (case-insensitive)
    pub fn is_blocked(&self, email: &str) -> bool {
        self.blocklist.contains(&email.trim().to_lowercase())
    }

    /// POST `body` as JSON, adding the bearer token when a provider is configured.
    ///
    /// Any non-2xx response is turned into [`MailError::Status`].
    pub async fn authenticated_post<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> MailResult<reqwest::Response> {
        debug!("POST {url}");

        let mut request = self.http.post(url).json(body);

        if let Some(provider) = &self.token_provider {
            let token = provider.get_token().await?;
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| MailError::Token(format!("invalid token header value: {e}")))?;
            value.set_sensitive(true);
            request = request.header(AUTHORIZATION, value);
        }

        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MailError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }
}

#[async_trait]
impl MailRepository for SendgridMailRepository {
    #[tracing::instrument(
        name = "mail.send",
        skip(self, mail),
        fields(subject = %mail.subject)
    )]
    async fn send(&self, mail: &OutgoingMail) -> MailResult<SendStatus> {
        if self.is_blocked(&mail.receiver.email) {
            info!("Recipient is blocklisted, mail not sent");
            return Ok(SendStatus::Blocked);
        }

        let message = SendgridMessage::from(mail);
        let resp = self.authenticated_post(self.send_url.clone(), &message).await?;

        debug!(status = resp.status().as_u16(), "Mail accepted by provider");
        Ok(SendStatus::Sent)
    }
}
