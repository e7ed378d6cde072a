//! Event-to-notification decision engine.
//!
//! Pure functions: no I/O, no shared state. Each route inspects the tail of
//! the incident history plus a few event-level flags and decides whether a
//! mail is warranted, who gets it, and which template and values it uses.

use chrono::{DateTime, Utc};

use crate::incident::{current_action, Action, Channel, HistoryEntry, IncidentEvent, Language};
use crate::template::TemplateParams;

use super::locale::{risk_label, risk_subject_prefix, state_label};
use super::types::{
    Notification, NotificationError, NotificationOutcome, Route, SuppressReason,
};

pub type EngineResult<T> = Result<T, NotificationError>;

/// Run the decision procedure of `route` against `event`.
///
/// `now` is only consulted by [`Route::Alert`] to compute elapsed hours.
pub fn decide(
    route: Route,
    event: &IncidentEvent,
    now: DateTime<Utc>,
) -> EngineResult<NotificationOutcome> {
    match route {
        Route::Update => decide_update(event),
        Route::Alert => decide_alert(event, now),
        Route::RiskChange => decide_risk_change(event),
    }
}

/// Lifecycle update, addressed to the reporter as a reply to the incident
pub fn decide_update(event: &IncidentEvent) -> EngineResult<NotificationOutcome> {
    let language = parse_language(event)?;
    let action = current_action(&event.history).ok_or_else(empty_history)?;
    let comment = latest_description(&event.history);

    let (template_name, params) = match action {
        Action::Created => {
            if event.channel == Channel::Email {
                return Ok(NotificationOutcome::Suppressed(
                    SuppressReason::EmailChannelCreation,
                ));
            }
            ("created", params([("client_name", event.client.name.clone())]))
        }
        Action::Escalated => {
            let new_state = localized_state(action, language)?;
            let old_state = localized_state(previous_state(&event.history)?, language)?;

            (
                "updated",
                params([
                    ("client_name", event.client.name.clone()),
                    ("old_state", old_state.to_string()),
                    ("new_state", new_state.to_string()),
                    ("comment", comment),
                ]),
            )
        }
        Action::Closed => (
            "closed",
            params([
                ("client_name", event.client.name.clone()),
                ("comment", comment),
            ]),
        ),
        Action::AiResponse => (
            "iaresponse",
            params([
                ("client_name", event.client.name.clone()),
                ("comment", comment),
            ]),
        ),
        Action::Unknown => {
            return Ok(NotificationOutcome::Suppressed(
                SuppressReason::UnhandledAction,
            ))
        }
    };

    Ok(NotificationOutcome::Send(Notification {
        recipient: event.reported_by.clone(),
        subject: format!("Re: {}", event.name),
        template_name,
        language,
        params,
    }))
}

/// Urgency alert for the assignee, always sent
pub fn decide_alert(event: &IncidentEvent, now: DateTime<Utc>) -> EngineResult<NotificationOutcome> {
    let language = parse_language(event)?;
    let first = event.history.first().ok_or_else(empty_history)?;

    Ok(NotificationOutcome::Send(Notification {
        recipient: event.assigned_to.clone(),
        subject: format!("Incidente urgente: {}", event.name),
        template_name: "urgent",
        language,
        params: params([
            ("client_name", event.client.name.clone()),
            ("description", first.description.clone()),
            ("time", elapsed_hours(first.timestamp, now).to_string()),
            ("url", incident_url(event)?),
        ]),
    }))
}

/// Risk level change for the assignee; events without a risk are ignored
pub fn decide_risk_change(event: &IncidentEvent) -> EngineResult<NotificationOutcome> {
    let language = parse_language(event)?;

    let Some(risk) = event.risk else {
        return Ok(NotificationOutcome::Suppressed(SuppressReason::NoRisk));
    };

    let prefix = risk_subject_prefix(language)
        .ok_or_else(|| NotificationError::UnsupportedLanguage(language.to_string()))?;
    let risk_level = risk_label(risk, language)
        .ok_or_else(|| NotificationError::UnsupportedLanguage(language.to_string()))?;

    Ok(NotificationOutcome::Send(Notification {
        recipient: event.assigned_to.clone(),
        subject: format!("{} : {}", prefix, event.name),
        template_name: "updaterisk",
        language,
        params: params([
            ("incident_name", event.name.clone()),
            ("client_name", event.client.name.clone()),
            ("url", incident_url(event)?),
            ("risk_level", risk_level.to_string()),
        ]),
    }))
}

/// The state an escalation moved away from.
///
/// Walks back from the entry before the latest one, skipping AI responses.
pub fn previous_state(history: &[HistoryEntry]) -> EngineResult<Action> {
    let earlier = history.split_last().map_or(&[][..], |(_, rest)| rest);

    earlier
        .iter()
        .rev()
        .map(|entry| entry.action)
        .find(|action| *action != Action::AiResponse)
        .ok_or_else(|| {
            NotificationError::HistoryIntegrity(
                "no state precedes the latest history entry".to_string(),
            )
        })
}

/// Link to the incident on the client's own domain
pub fn incident_url(event: &IncidentEvent) -> EngineResult<String> {
    let domain = event.client.incidents_domain().ok_or_else(|| {
        NotificationError::InvalidClientEmail(event.client.incidents_email.clone())
    })?;

    Ok(format!("https://{}/incidents/{}", domain, event.id))
}

/// Whole hours between `since` and `now`, rounded down
pub fn elapsed_hours(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_hours().max(0)
}

fn parse_language(event: &IncidentEvent) -> EngineResult<Language> {
    event
        .language
        .parse()
        .map_err(NotificationError::UnsupportedLanguage)
}

fn latest_description(history: &[HistoryEntry]) -> String {
    history
        .last()
        .map(|entry| entry.description.clone())
        .unwrap_or_default()
}

fn empty_history() -> NotificationError {
    NotificationError::HistoryIntegrity("history is empty".to_string())
}

fn localized_state(action: Action, language: Language) -> EngineResult<&'static str> {
    state_label(action, language).ok_or_else(|| {
        NotificationError::HistoryIntegrity(format!("{action:?} is not an incident state"))
    })
}

fn params<const N: usize>(pairs: [(&str, String); N]) -> TemplateParams {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
