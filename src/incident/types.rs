use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Incident as delivered by the incident-management webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentEvent {
    /// Opaque incident identifier
    pub id: String,
    /// Display name, used in mail subjects
    pub name: String,
    /// Medium the incident was created through
    pub channel: Channel,
    /// Locale code of the reporter; validated by the decision engine
    pub language: String,
    pub reported_by: Person,
    pub created_by: Person,
    pub assigned_to: Person,
    /// Append-only action log, oldest first
    pub history: Vec<HistoryEntry>,
    pub client: Client,
    /// Only present on risk-change events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<Risk>,
}

impl IncidentEvent {
    /// Structural checks the wire format cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.history.is_empty() {
            return Err("history must contain at least one entry".to_string());
        }

        if self.history.windows(2).any(|w| w[0].seq >= w[1].seq) {
            return Err("history entries must have increasing seq values".to_string());
        }

        Ok(())
    }
}

/// Person attached to an incident (reporter, creator or assignee)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// Customer organisation owning the incident
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    /// Mailbox incidents are reported to; also the sender of notifications
    #[serde(rename = "emailIncidents")]
    pub incidents_email: String,
    pub plan: Plan,
}

impl Client {
    /// Domain part of the incidents mailbox (after the last `@`).
    ///
    /// `None` when the domain is empty or could not be used as a URL host.
    pub fn incidents_domain(&self) -> Option<&str> {
        self.incidents_email
            .rsplit_once('@')
            .map(|(_, domain)| domain.trim())
            .filter(|domain| {
                !domain.is_empty()
                    && !domain
                        .chars()
                        .any(|c| matches!(c, '@' | '/' | '\\' | '?' | '#') || c.is_whitespace())
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Emprendedor,
    Empresario,
    EmpresarioPlus,
}

/// Origin medium of an incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Web,
    Mobile,
}

/// One step in an incident lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Created,
    Escalated,
    Closed,
    AiResponse,
    /// Actions this service does not know about; never notified
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Medium,
    High,
}

/// Languages notifications can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Es,
    Pt,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Es, Language::Pt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::Pt => "pt",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "es" => Ok(Language::Es),
            "pt" => Ok(Language::Pt),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of the incident history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Monotonic sequence number assigned by the caller
    pub seq: i64,
    #[serde(rename = "date", deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub action: Action,
    pub description: String,
}

/// The action of the latest history entry
pub fn current_action(history: &[HistoryEntry]) -> Option<Action> {
    history.last().map(|entry| entry.action)
}

/// Accepts RFC 3339 timestamps as well as offset-less ones, which are read as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
