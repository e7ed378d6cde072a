use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::env;

/// Legacy variable holding the SendGrid API key
const SENDGRID_APIKEY_VAR: &str = "SENDGRID_APIKEY";

const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sendgrid: SendgridConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendgridConfig {
    /// API key sent as bearer token; unauthenticated sends when absent
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_sendgrid_url")]
    pub base_url: String,
    /// Recipients that never receive mail
    #[serde(default)]
    pub blocklist: Vec<String>,
    /// Timeout for a whole provider call, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_sendgrid_url() -> String {
    "https://api.sendgrid.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("sendgrid.base_url", "https://api.sendgrid.com")?
            .set_default("sendgrid.timeout_seconds", 10)?
            .set_default("logging.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // SERVER__PORT, SENDGRID__API_KEY, SENDGRID__BLOCKLIST=a@x.com,b@y.com, ...
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("sendgrid.blocklist")
                    .with_list_parse_key("server.cors_origins"),
            )
            .set_override_option("sendgrid.api_key", env::var(SENDGRID_APIKEY_VAR).ok())?
            .set_override_option("logging.format", env::var(LOG_FORMAT_VAR).ok())?;

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

impl Default for SendgridConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_sendgrid_url(),
            blocklist: vec![],
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_values() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);

        let sendgrid = SendgridConfig::default();
        assert_eq!(sendgrid.base_url, "https://api.sendgrid.com");
        assert_eq!(sendgrid.timeout_seconds, 10);
        assert!(sendgrid.api_key.is_none());
        assert!(sendgrid.blocklist.is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let settings: Settings = Config::builder()
            .set_override("sendgrid.blocklist", vec!["a@b.com"])
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.sendgrid.blocklist, vec!["a@b.com".to_string()]);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_api_key_is_secret() {
        let settings: Settings = Config::builder()
            .set_override("sendgrid.api_key", "SG.secret")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let api_key = settings.sendgrid.api_key.as_ref().unwrap();
        assert_eq!(api_key.expose_secret(), "SG.secret");
        assert!(!format!("{settings:?}").contains("SG.secret"));
    }
}
