use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::incident::IncidentEvent;
use crate::mail::{Mailbox, MailRepository, OutgoingMail, SendStatus};
use crate::template::{TemplateResult, TemplateStore};

use super::engine::decide;
use super::types::{Notification, NotificationOutcome, Route, SuppressReason};

/// Final state of a dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    /// Mail accepted by the provider
    Sent,
    /// The engine decided no mail is warranted
    Suppressed,
    /// Recipient is blocklisted
    Blocked,
}

/// Result of dispatching one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub status: DispatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SuppressReason>,
}

impl DispatchReport {
    fn suppressed(reason: SuppressReason) -> Self {
        Self {
            status: DispatchStatus::Suppressed,
            template: None,
            reason: Some(reason),
        }
    }

    fn delivered(status: SendStatus, template: &'static str) -> Self {
        let status = match status {
            SendStatus::Sent => DispatchStatus::Sent,
            SendStatus::Blocked => DispatchStatus::Blocked,
        };

        Self {
            status,
            template: Some(template),
            reason: None,
        }
    }
}

/// Turns incident events into at most one mail each
pub struct NotificationDispatcher {
    templates: TemplateStore,
    mail: Arc<dyn MailRepository>,
}

impl NotificationDispatcher {
    /// Create a dispatcher using the built-in templates
    pub fn new(mail: Arc<dyn MailRepository>) -> Self {
        Self::with_templates(mail, TemplateStore::new())
    }

    pub fn with_templates(mail: Arc<dyn MailRepository>, templates: TemplateStore) -> Self {
        Self { templates, mail }
    }

    pub async fn dispatch(&self, route: Route, event: &IncidentEvent) -> Result<DispatchReport> {
        self.dispatch_at(route, event, Utc::now()).await
    }

    /// Dispatch with an explicit clock
    #[tracing::instrument(
        name = "notification.dispatch",
        skip(self, event, now),
        fields(incident_id = %event.id)
    )]
    pub async fn dispatch_at(
        &self,
        route: Route,
        event: &IncidentEvent,
        now: DateTime<Utc>,
    ) -> Result<DispatchReport> {
        let notification = match decide(route, event, now)? {
            NotificationOutcome::Suppressed(reason) => {
                tracing::info!(?reason, "Notification suppressed");
                return Ok(DispatchReport::suppressed(reason));
            }
            NotificationOutcome::Send(notification) => notification,
        };

        let mail = self.compose(event, &notification)?;
        let status = self.mail.send(&mail).await?;

        tracing::info!(
            template = notification.template_name,
            language = %notification.language,
            ?status,
            "Notification dispatched"
        );

        Ok(DispatchReport::delivered(status, notification.template_name))
    }

    /// Render the notification into a mail sent on behalf of the client
    pub fn compose(
        &self,
        event: &IncidentEvent,
        notification: &Notification,
    ) -> TemplateResult<OutgoingMail> {
        let text = self.templates.render(
            notification.template_name,
            notification.language,
            &notification.params,
        )?;

        Ok(OutgoingMail {
            sender: Mailbox::new(
                Some(event.client.name.clone()),
                event.client.incidents_email.clone(),
            ),
            receiver: Mailbox::new(
                Some(notification.recipient.name.clone()),
                notification.recipient.email.clone(),
            ),
            subject: notification.subject.clone(),
            text,
            reply_to: None,
        })
    }
}
