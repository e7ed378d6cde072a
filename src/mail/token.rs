use async_trait::async_trait;
use secrecy::SecretString;

use super::repository::MailResult;

/// Supplies the bearer token for each provider call
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self) -> MailResult<SecretString>;
}

/// Token fixed at startup, e.g. an API key from the environment
#[derive(Debug)]
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    pub fn from_secret(token: SecretString) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> MailResult<SecretString> {
        Ok(self.token.clone())
    }
}
