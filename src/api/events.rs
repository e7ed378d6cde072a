//! Incident webhook handlers, one per notification route

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::incident::IncidentEvent;
use crate::notification::{DispatchStatus, Route};
use crate::server::AppState;

/// Body returned once an event has been fully handled
#[derive(Debug, Serialize)]
pub struct EventProcessedResponse {
    pub message: String,
    pub code: u16,
    pub status: DispatchStatus,
}

/// Lifecycle change (created, escalated, closed, AI response) for the reporter
#[tracing::instrument(name = "http.incident_update", skip(state, payload))]
pub async fn incident_update(
    State(state): State<AppState>,
    payload: std::result::Result<Json<IncidentEvent>, JsonRejection>,
) -> Result<Json<EventProcessedResponse>> {
    process(&state, Route::Update, payload).await
}

/// Urgent incident alert for the assignee
#[tracing::instrument(name = "http.incident_alert", skip(state, payload))]
pub async fn incident_alert(
    State(state): State<AppState>,
    payload: std::result::Result<Json<IncidentEvent>, JsonRejection>,
) -> Result<Json<EventProcessedResponse>> {
    process(&state, Route::Alert, payload).await
}

/// Risk level change for the assignee
#[tracing::instrument(name = "http.incident_risk", skip(state, payload))]
pub async fn incident_risk(
    State(state): State<AppState>,
    payload: std::result::Result<Json<IncidentEvent>, JsonRejection>,
) -> Result<Json<EventProcessedResponse>> {
    process(&state, Route::RiskChange, payload).await
}

async fn process(
    state: &AppState,
    route: Route,
    payload: std::result::Result<Json<IncidentEvent>, JsonRejection>,
) -> Result<Json<EventProcessedResponse>> {
    let Json(event) = payload?;
    event.validate().map_err(AppError::Validation)?;

    tracing::debug!(incident_id = %event.id, history_len = event.history.len(), "Incident event received");

    let report = state.dispatcher.dispatch(route, &event).await?;

    Ok(Json(EventProcessedResponse {
        message: "Event processed.".to_string(),
        code: 200,
        status: report.status,
    }))
}
