//! API layer - HTTP endpoint handlers.

mod events;
mod health;
mod routes;

pub use events::{incident_alert, incident_risk, incident_update, EventProcessedResponse};
pub use health::{health, HealthResponse};
pub use routes::api_routes;
