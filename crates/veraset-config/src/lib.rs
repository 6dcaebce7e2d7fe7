//! Veraset configuration
//!
//! Loads `AppConfig` from `<config dir>/veraset/config.toml` (or an explicit path)
//! and `VERASET__SECTION__KEY` environment overrides.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, ENV_PREFIX};
pub use types::{
    AppConfig, ConfigManager as ConfigManagerTrait, DefaultsConfig, LoggingConfig,
    ServiceConfig, LOG_LEVELS,
};
