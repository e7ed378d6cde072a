//! Incident notifications: deciding, composing and dispatching.
//!
//! - `engine`: pure decision procedures, one per [`Route`]
//! - `locale`: fixed localization tables used by the engine
//! - `dispatcher`: renders the chosen template and hands the mail to a
//!   [`MailRepository`](crate::mail::MailRepository)

mod dispatcher;
pub mod engine;
pub mod locale;
mod types;

pub use dispatcher::{DispatchReport, DispatchStatus, NotificationDispatcher};
pub use engine::decide;
pub use types::{Notification, NotificationError, NotificationOutcome, Route, SuppressReason};
