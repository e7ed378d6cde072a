mod app;
mod state;

pub use app::{create_app, MAX_BODY_BYTES};
pub use state::AppState;
