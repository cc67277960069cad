//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Mock backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON file holding the todo collection
    pub db_path: PathBuf,
    /// Upper bound of the random delay added before each request; 0 disables it
    #[serde(default)]
    pub max_latency_ms: u64,
}

/// Walkthrough client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(default = "default_random_todo_count")]
    pub random_todo_count: usize,
}

impl ClientConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_random_todo_count() -> usize {
    7
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config/default` is missing or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__SERVER__PORT)
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_optional_fields_take_defaults() {
        let config = from_toml(
            r#"
[server]
host = "127.0.0.1"
port = 3000
db_path = "db.json"

[client]
base_url = "http://127.0.0.1:3000"
timeout_secs = 5
"#,
        );

        assert_eq!(config.server.max_latency_ms, 0);
        assert_eq!(config.client.random_todo_count, 7);
        assert_eq!(config.client.timeout(), Duration::from_secs(5));
        assert!(!config.logging.json);
    }

    #[test]
    fn test_shipped_default_file_parses() {
        let config = from_toml(include_str!("../../../config/default.toml"));
        assert_eq!(config.server.db_path, PathBuf::from("db.json"));
        assert!(config.client.base_url.starts_with("http://"));
    }
}
