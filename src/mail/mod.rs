//! Mail delivery through the SendGrid v3 REST API.
//!
//! [`MailRepository`] is the seam the rest of the service talks to;
//! [`SendgridMailRepository`] is the production implementation. Auth is
//! supplied per call by an optional [`TokenProvider`]: without one, requests
//! go out unauthenticated, which is how environments without mail
//! credentials run.

mod message;
mod repository;
mod sendgrid;
mod token;

pub use message::{Mailbox, OutgoingMail, SendgridContent, SendgridMessage, SendgridPersonalization};
pub use repository::{MailError, MailRepository, MailResult, SendStatus};
pub use sendgrid::{SendgridMailRepository, SENDGRID_SEND_PATH};
pub use token::{StaticTokenProvider, TokenProvider};
