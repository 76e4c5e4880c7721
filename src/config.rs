//! Configuration management for the holdings status service

use std::collections::HashMap;
use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::enums::{CallNumberMode, LocationMode};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// `[item_status]` section: how multiple values are summarized
#[derive(Debug, Deserialize, Clone)]
pub struct ItemStatusConfig {
    #[serde(default)]
    pub multiple_call_nos: CallNumberMode,
    #[serde(default)]
    pub multiple_locations: LocationMode,
    #[serde(default)]
    pub show_full_status: bool,
}

/// Status backend (ILS availability service)
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HoldsConfig {
    /// Copies shelved at these locations are never reported
    #[serde(default)]
    pub suppressed_locations: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub item_status: ItemStatusConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub holds: HoldsConfig,
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // HOLDINGS_SERVER__PORT=9000 etc.
            .add_source(
                Environment::with_prefix("HOLDINGS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("backend.url", env::var("STATUS_BACKEND_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ItemStatusConfig {
    fn default() -> Self {
        Self {
            multiple_call_nos: CallNumberMode::Msg,
            multiple_locations: LocationMode::Msg,
            show_full_status: false,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8081/statuses".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            item_status: ItemStatusConfig::default(),
            backend: BackendConfig::default(),
            holds: HoldsConfig::default(),
            translations: HashMap::new(),
        }
    }
}
