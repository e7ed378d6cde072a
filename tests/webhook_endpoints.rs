//! End-to-end tests of the incident webhooks
//!
//! Requests go through the full router; mail delivery is replaced by an
//! in-memory repository that records what would have been sent.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use incident_notification_service::config::Settings;
use incident_notification_service::mail::{
    MailError, MailRepository, MailResult, OutgoingMail, SendStatus,
};
use incident_notification_service::server::{create_app, AppState};

const UPDATE: &str = "/api/v1/incident-update/notification";
const ALERT: &str = "/api/v1/incident-alert/notification";
const RISK: &str = "/api/v1/incident-risk/notification";

#[derive(Default)]
struct RecordingMail {
    sent: Mutex<Vec<OutgoingMail>>,
    fail_with: Option<u16>,
}

impl RecordingMail {
    fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailRepository for RecordingMail {
    async fn send(&self, mail: &OutgoingMail) -> MailResult<SendStatus> {
        if let Some(status) = self.fail_with {
            return Err(MailError::Status {
                status,
                body: String::new(),
            });
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(SendStatus::Sent)
    }
}

fn person(name: &str, email: &str, role: &str) -> Value {
    json!({"id": format!("{name}-id"), "name": name, "email": email, "role": role})
}

fn history(actions: &[&str]) -> Value {
    let start = Utc::now() - Duration::minutes(10);
    Value::Array(
        actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                json!({
                    "seq": i,
                    "date": (start + Duration::seconds(i as i64)).to_rfc3339(),
                    "action": action,
                    "description": format!("comment {i}")
                })
            })
            .collect(),
    )
}

fn incident(channel: &str, language: &str, actions: &[&str]) -> Value {
    json!({
        "id": "inc-900",
        "name": "Email outage",
        "channel": channel,
        "language": language,
        "reportedBy": person("Rita", "rita@example.com", "user"),
        "createdBy": person("Rita", "rita@example.com", "user"),
        "assignedTo": person("Ale", "ale@b.com", "agent"),
        "history": history(actions),
        "client": {
            "id": "client-1",
            "name": "Acme",
            "emailIncidents": "a@b.com",
            "plan": "empresario"
        }
    })
}

async fn post(mail: Arc<RecordingMail>, uri: &str, body: String) -> (StatusCode, Value) {
    let app = create_app(AppState::new(Settings::default(), mail));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(mail: Arc<RecordingMail>, uri: &str, body: &Value) -> (StatusCode, Value) {
    post(mail, uri, body.to_string()).await
}

// =============================================================================
// Update route
// =============================================================================

#[tokio::test]
async fn test_update_created_via_email_sends_nothing() {
    let mail = Arc::new(RecordingMail::default());

    let (status, body) =
        post_json(mail.clone(), UPDATE, &incident("email", "es", &["created"])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event processed.");
    assert_eq!(body["status"], "suppressed");
    assert!(mail.sent().is_empty());
}

#[tokio::test]
async fn test_update_created_via_web_or_mobile_sends_one_mail() {
    for channel in ["web", "mobile"] {
        let mail = Arc::new(RecordingMail::default());

        let (status, body) =
            post_json(mail.clone(), UPDATE, &incident(channel, "pt", &["created"])).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "sent");

        let sent = mail.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].receiver.email, "rita@example.com");
        assert_eq!(sent[0].receiver.name.as_deref(), Some("Rita"));
        assert_eq!(sent[0].sender.email, "a@b.com");
        assert_eq!(sent[0].subject, "Re: Email outage");
        assert!(sent[0].text.contains("Recebemos o seu incidente"));
    }
}

#[tokio::test]
async fn test_update_escalated_describes_state_change() {
    let mail = Arc::new(RecordingMail::default());

    let (status, _) = post_json(
        mail.clone(),
        UPDATE,
        &incident("web", "es", &["created", "escalated"]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let text = &mail.sent()[0].text;
    assert!(text.contains("\"creado\" a \"escalado\""));
    assert!(text.contains("comment 1"));
}

#[tokio::test]
async fn test_update_escalated_after_ai_response_looks_past_it() {
    let mail = Arc::new(RecordingMail::default());

    let (status, _) = post_json(
        mail.clone(),
        UPDATE,
        &incident("web", "pt", &["created", "closed", "ai_response", "escalated"]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(mail.sent()[0].text.contains("\"fechado\" para \"escalado\""));
}

#[tokio::test]
async fn test_update_escalated_without_prior_state_is_rejected() {
    let mail = Arc::new(RecordingMail::default());

    let (status, body) =
        post_json(mail.clone(), UPDATE, &incident("web", "es", &["escalated"])).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "HISTORY_INTEGRITY_ERROR");
    assert!(mail.sent().is_empty());
}

#[tokio::test]
async fn test_update_unknown_action_is_a_no_op() {
    let mail = Arc::new(RecordingMail::default());

    let (status, body) =
        post_json(mail.clone(), UPDATE, &incident("web", "es", &["created", "reopened"])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "suppressed");
    assert!(mail.sent().is_empty());
}

// =============================================================================
// Alert route
// =============================================================================

#[tokio::test]
async fn test_alert_goes_to_assignee_with_incident_url() {
    let mail = Arc::new(RecordingMail::default());

    let (status, body) = post_json(
        mail.clone(),
        ALERT,
        &incident("email", "es", &["created", "escalated"]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sent");

    let sent = mail.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].receiver.email, "ale@b.com");
    assert_eq!(sent[0].subject, "Incidente urgente: Email outage");
    assert!(sent[0].text.contains("https://b.com/incidents/inc-900"));
    assert!(sent[0].text.contains("lleva 0 horas"));
    assert!(sent[0].text.contains("comment 0"));
}

// =============================================================================
// Risk route
// =============================================================================

#[tokio::test]
async fn test_risk_without_level_sends_nothing() {
    let mail = Arc::new(RecordingMail::default());

    let (status, body) = post_json(mail.clone(), RISK, &incident("web", "es", &["created"])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "suppressed");
    assert!(mail.sent().is_empty());
}

#[tokio::test]
async fn test_risk_subject_follows_language() {
    for (language, risk, subject, label) in [
        ("es", "low", "Riesgo actualizado : Email outage", "Bajo"),
        ("pt", "medium", "Risco atualizado : Email outage", "Médio"),
    ] {
        let mail = Arc::new(RecordingMail::default());
        let mut event = incident("web", language, &["created"]);
        event["risk"] = json!(risk);

        let (status, _) = post_json(mail.clone(), RISK, &event).await;

        assert_eq!(status, StatusCode::OK);
        let sent = mail.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, subject);
        assert_eq!(sent[0].receiver.email, "ale@b.com");
        assert!(sent[0].text.contains(label));
    }
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_unsupported_language_is_client_error() {
    let mail = Arc::new(RecordingMail::default());

    let (status, body) = post_json(mail.clone(), ALERT, &incident("web", "en", &["created"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_LANGUAGE");
    assert!(mail.sent().is_empty());
}

#[tokio::test]
async fn test_malformed_payloads_are_validation_errors() {
    let mut missing_field = incident("web", "es", &["created"]);
    missing_field.as_object_mut().unwrap().remove("reportedBy");

    for body in [
        "{not json".to_string(),
        missing_field.to_string(),
        incident("web", "es", &[]).to_string(),
    ] {
        let mail = Arc::new(RecordingMail::default());
        let (status, response) = post(mail.clone(), UPDATE, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
        assert!(mail.sent().is_empty());
    }
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let mail = Arc::new(RecordingMail {
        fail_with: Some(500),
        ..RecordingMail::default()
    });

    let (status, body) = post_json(mail, UPDATE, &incident("web", "es", &["created", "closed"])).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "MAIL_TRANSPORT_ERROR");
}

#[tokio::test]
async fn test_health() {
    let app = create_app(AppState::new(
        Settings::default(),
        Arc::new(RecordingMail::default()),
    ));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
