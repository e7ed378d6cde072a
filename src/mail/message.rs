//! Outgoing mail and its SendGrid wire representation

use std::collections::BTreeMap;

use serde::Serialize;

/// Mail address with an optional display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mailbox {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Mailbox {
    pub fn new(name: Option<String>, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name,
        }
    }
}

/// A single plain-text mail to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub sender: Mailbox,
    pub receiver: Mailbox,
    pub subject: String,
    pub text: String,
    /// Message-ID this mail continues, if any
    pub reply_to: Option<String>,
}

/// `POST /v3/mail/send` request body
#[derive(Debug, Clone, Serialize)]
pub struct SendgridMessage {
    pub personalizations: Vec<SendgridPersonalization>,
    pub from: Mailbox,
    pub subject: String,
    pub content: Vec<SendgridContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendgridPersonalization {
    pub to: Vec<Mailbox>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendgridContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

impl From<&OutgoingMail> for SendgridMessage {
    fn from(mail: &OutgoingMail) -> Self {
        // In-Reply-To and References together make providers thread the reply
        let headers = mail.reply_to.as_ref().map(|reply_to| {
            BTreeMap::from([
                ("In-Reply-To".to_string(), reply_to.clone()),
                ("References".to_string(), reply_to.clone()),
            ])
        });

        Self {
            personalizations: vec![SendgridPersonalization {
                to: vec![mail.receiver.clone()],
            }],
            from: mail.sender.clone(),
            subject: mail.subject.clone(),
            content: vec![SendgridContent {
                content_type: "text/plain".to_string(),
                value: mail.text.clone(),
            }],
            headers,
        }
    }
}
