mod settings;

pub use settings::{LogFormat, LoggingConfig, SendgridConfig, ServerConfig, Settings};
