use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// Application configuration, loaded from `STOREFRONT_`-prefixed environment
/// variables with sensible defaults for every field.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_cart_file")]
    pub cart_file: String,
    #[serde(default = "default_orders_file")]
    pub orders_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_enable_json_logging")]
    pub enable_json_logging: bool,
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");

        let storage = StorageConfig::from_env()?;
        let observability = ObservabilityConfig::from_env()?;

        let config = Config {
            storage,
            observability,
        };

        config.validate()?;

        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_dir.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Data directory cannot be empty".to_string(),
            });
        }

        if self.storage.cart_file.is_empty() || self.storage.orders_file.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Storage file names cannot be empty".to_string(),
            });
        }

        if self.observability.service_name.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Service name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("STOREFRONT"))
            .build()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to load storage config: {}", e),
            })?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize storage config: {}", e),
            })
    }

    /// Path of the cart slot inside the data directory
    pub fn cart_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.cart_file)
    }

    /// Path of the order-history slot inside the data directory
    pub fn orders_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.orders_file)
    }
}

impl ObservabilityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("STOREFRONT"))
            .build()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to load observability config: {}", e),
            })?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize observability config: {}", e),
            })
    }
}

// Default value functions
pub(crate) fn default_data_dir() -> String {
    ".storefront".to_string()
}

pub(crate) fn default_cart_file() -> String {
    "cart.json".to_string()
}

pub(crate) fn default_orders_file() -> String {
    "orders.json".to_string()
}

pub(crate) fn default_service_name() -> String {
    "storefront-rs".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_enable_json_logging() -> bool {
    false
}
