//! Shelf API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use shelf_service::{ServiceConfig, UpdatePolicy};
use shelf_store::StoreConfig;

/// Shelf API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server port
    pub port: u16,

    /// Path of the products JSON file
    pub products_path: PathBuf,

    /// Write the products file indented
    pub products_pretty: bool,

    /// What PUT does with a key that matches nothing
    pub update_policy: UpdatePolicy,

    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(ApiConfig {
            port: var("PORT", "8080")
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            products_path: PathBuf::from(var("PRODUCTS_PATH", "./products.json")),

            products_pretty: parse_flag("PRODUCTS_PRETTY", &var("PRODUCTS_PRETTY", "false"))?,

            update_policy: var("UPDATE_POLICY", "strict")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("UPDATE_POLICY".to_string()))?,

            log_json: parse_flag("SHELF_LOG_JSON", &var("SHELF_LOG_JSON", "false"))?,
        })
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.products_path).pretty(self.products_pretty)
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::new().update_policy(self.update_policy)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
