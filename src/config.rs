//! Host configuration for the admin facade
//!
//! Configuration is read from a TOML file and may be overridden from
//! `CONTENT_ADMIN_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_CONTENT_API_URL: &str = "CONTENT_ADMIN_CONTENT_API_URL";
pub const ENV_IDENTITY_URL: &str = "CONTENT_ADMIN_IDENTITY_URL";
pub const ENV_TOKEN: &str = "CONTENT_ADMIN_TOKEN";
pub const ENV_USE_DATA_LAYER: &str = "CONTENT_ADMIN_USE_DATA_LAYER";
pub const ENV_SCHEMA_PATH: &str = "CONTENT_ADMIN_SCHEMA_PATH";
pub const ENV_LOG_LEVEL: &str = "CONTENT_ADMIN_LOG_LEVEL";

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration for an [`AdminFacade`](crate::facade::AdminFacade)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// URL operation documents are posted to
    pub content_api_url: String,
    /// Session check endpoint; local mode when absent
    #[serde(default)]
    pub identity_url: Option<String>,
    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,
    /// Host flag captured by the facade at construction
    #[serde(default)]
    pub use_data_layer: bool,
    /// JSON schema definition backing local metadata
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            content_api_url: "http://localhost:4001/graphql".to_string(),
            identity_url: None,
            token: None,
            use_data_layer: false,
            schema_path: None,
            request_timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl AdminConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AdminConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Override fields from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override fields from any key lookup; used by `apply_env_overrides`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_CONTENT_API_URL) {
            self.content_api_url = url;
        }
        if let Some(url) = lookup(ENV_IDENTITY_URL) {
            self.identity_url = Some(url);
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(flag) = lookup(ENV_USE_DATA_LAYER) {
            self.use_data_layer = parse_flag(&flag).ok_or_else(|| {
                ConfigError::Invalid(format!("{} must be a boolean, got {}", ENV_USE_DATA_LAYER, flag))
            })?;
        }
        if let Some(path) = lookup(ENV_SCHEMA_PATH) {
            self.schema_path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_api_url.trim().is_empty() {
            return Err(ConfigError::Invalid("content_api_url must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!("unknown log level: {}", self.log_level)));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
