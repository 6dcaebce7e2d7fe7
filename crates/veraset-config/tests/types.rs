use std::time::Duration;

use tempfile::TempDir;
use veraset_config::*;

/// Manager reading from a scratch directory and an env prefix no other test uses
fn manager(dir: &TempDir, prefix: &str) -> ConfigManager {
    ConfigManager::with_path(dir.path().join("veraset").join("config.toml")).with_env_prefix(prefix)
}

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();
    assert_eq!(config.service.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.service.endpoint, "/calculate");
    assert_eq!(config.service.timeout(), Duration::from_secs(30));
    assert_eq!(config.service.connect_timeout(), Duration::from_secs(10));
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.defaults.deceased_name, "Deceased Person");
}

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager(&dir, "VERASET_TEST_MISSING");
    let config = manager.load_config().unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager(&dir, "VERASET_TEST_SAVE");

    let mut config = AppConfig::default();
    config.service.base_url = "https://calc.example.com".to_string();
    config.service.timeout_secs = 5;
    config.defaults.deceased_name = "Mustafa".to_string();
    manager.save_config(&config).unwrap();

    assert!(manager.config_path().exists());
    assert_eq!(manager.load_config().unwrap(), config);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager(&dir, "VERASET_TEST_PARTIAL");
    std::fs::create_dir_all(manager.config_path().parent().unwrap()).unwrap();
    std::fs::write(manager.config_path(), "[logging]\nlevel = \"debug\"\n").unwrap();

    let config = manager.load_config().unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.service, ServiceConfig::default());
}

#[test]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let mut manager = manager(&dir, "VERASET_TEST_ENV");
    std::env::set_var("VERASET_TEST_ENV__SERVICE__BASE_URL", "http://10.0.0.5:9000");
    std::env::set_var("VERASET_TEST_ENV__SERVICE__TIMEOUT_SECS", "12");

    let config = manager.load_config().unwrap();
    std::env::remove_var("VERASET_TEST_ENV__SERVICE__BASE_URL");
    std::env::remove_var("VERASET_TEST_ENV__SERVICE__TIMEOUT_SECS");

    assert_eq!(config.service.base_url, "http://10.0.0.5:9000");
    assert_eq!(config.service.timeout_secs, 12);
}

#[test]
fn test_config_validation() {
    let manager = ConfigManager::new();
    let mut config = AppConfig::default();
    assert!(manager.validate_config(&config).is_ok());

    config.service.timeout_secs = 0;
    assert!(matches!(
        manager.validate_config(&config),
        Err(ConfigError::Validation(_))
    ));

    let mut config = AppConfig::default();
    config.service.base_url = "ftp://example.com".to_string();
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.logging.level = "verbose".to_string();
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.logging.level = "WARN".to_string();
    assert!(manager.validate_config(&config).is_ok());
}
