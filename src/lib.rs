// Infrastructure (shared components)
pub mod config;
pub mod error;
pub mod telemetry;

// Domain layer (business logic)
pub mod incident;
pub mod mail;
pub mod notification;
pub mod template;

// Application layer
pub mod api;
pub mod server;
