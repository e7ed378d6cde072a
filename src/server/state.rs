use std::sync::Arc;

use crate::config::Settings;
use crate::mail::MailRepository;
use crate::notification::NotificationDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dispatcher: Arc<NotificationDispatcher>,
}

impl AppState {
    /// `mail` is the process-wide repository, built once at startup
    pub fn new(settings: Settings, mail: Arc<dyn MailRepository>) -> Self {
        let dispatcher = Arc::new(NotificationDispatcher::new(mail));

        Self {
            settings: Arc::new(settings),
            dispatcher,
        }
    }
}
