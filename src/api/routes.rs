use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

use super::events::{incident_alert, incident_risk, incident_update};
use super::health::health;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Incident webhooks
        .nest(
            "/api/v1",
            Router::new()
                .route("/incident-update/notification", post(incident_update))
                .route("/incident-alert/notification", post(incident_alert))
                .route("/incident-risk/notification", post(incident_risk)),
        )
}
