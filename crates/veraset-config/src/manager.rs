//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{AppConfig, ConfigManager as ConfigManagerTrait, LOG_LEVELS},
};

/// Prefix of environment overrides, e.g. `VERASET__SERVICE__BASE_URL`
pub const ENV_PREFIX: &str = "VERASET";

const ENV_SEPARATOR: &str = "__";

/// Configuration manager
///
/// Layers the TOML file (optional) under environment overrides.
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("veraset")
            .join("config.toml")
    }
}

impl ConfigManagerTrait for ConfigManager {
    fn load_config(&mut self) -> Result<AppConfig> {
        debug!(path = %self.config_path.display(), "Loading configuration");
        let builder = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        Ok(app_config)
    }

    fn save_config(&self, config: &AppConfig) -> Result<()> {
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        debug!(path = %self.config_path.display(), "Saved configuration");
        Ok(())
    }

    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        let service = &config.service;
        let base_url = url::Url::parse(&service.base_url).map_err(|e| {
            ConfigError::Validation(format!("service.base_url {:?}: {e}", service.base_url))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "service.base_url must use http or https, got {}",
                base_url.scheme()
            )));
        }
        if service.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "service.endpoint cannot be empty".to_string(),
            ));
        }
        if service.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "service.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if service.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "service.connect_timeout_secs must be greater than 0".to_string(),
            ));
        }
        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                config.logging.level
            )));
        }
        if config.defaults.deceased_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "defaults.deceased_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
