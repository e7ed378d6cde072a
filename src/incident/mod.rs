//! Incident event model.
//!
//! An [`IncidentEvent`] is built once per webhook request from the JSON
//! payload and never mutated afterwards. The current state of an incident
//! is always derived from the tail of its append-only history, see
//! [`current_action`].

mod types;

pub use types::{
    current_action, Action, Channel, Client, HistoryEntry, IncidentEvent, Language, Person, Plan,
    Risk, Role,
};
