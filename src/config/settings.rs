use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

/// Runtime configuration, constructed once at process start and passed to
/// the components that need it. Nothing reads endpoint constants from
/// anywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

/// Where the MedBot service lives and which logical conversation this
/// process speaks for. Exactly one session is supported at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// Layer `config/{CONFIG_ENV}.toml` (optional) and `MEDBOT__`-prefixed
    /// environment variables over the built-in defaults.
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());

        let config = Config::builder()
            .set_default("service.base_url", "http://localhost:5000/api")?
            .set_default("service.session_id", "default_session")?
            .set_default("logging.level", "info")?
            .add_source(File::with_name(&format!("config/{}", config_env)).required(false))
            .add_source(Environment::with_prefix("MEDBOT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
