use serde::Deserialize;

/// Deployment environment the service runs in.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Development,
    Staging,
    Production,
}

impl AppEnv {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

/// Configuration options specific to the LLMoonClip service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    pub env: AppEnv,
    /// Default `env_logger` filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Root directory for externally stored markdown bodies.
    pub storage_path: String,
    pub bind_address: String,
    pub port: u16,
    /// Reject responses pointing at unknown categories on create/update.
    pub validate_categories: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "llmoonclip.db".to_string(),
            env: AppEnv::Development,
            log_level: "info".to_string(),
            storage_path: "./storage/markdown".to_string(),
            bind_address: "127.0.0.1".to_string(),
            port: 8000,
            validate_categories: false,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from built-in defaults, optional YAML files under
    /// `config/` and `APP_`-prefixed environment variables, in that order.
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| defaults.env.as_str().to_string());

        config::Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("env", defaults.env.as_str())?
            .set_default("log_level", defaults.log_level)?
            .set_default("storage_path", defaults.storage_path)?
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", defaults.port as i64)?
            .set_default("validate_categories", defaults.validate_categories)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(config::Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
