//! Layered configuration loading: file, then `LAUNCHPAD__*` environment overrides.
//!
//! Environment variables are process-global, so every test here runs serially.

use launchpad_core::config::AppConfig;
use serial_test::serial;
use std::{path::PathBuf, time::Duration};

const OVERRIDE_KEYS: &[&str] = &[
    "LAUNCHPAD__RETRY__MAX_ATTEMPTS",
    "LAUNCHPAD__BALANCE__CACHE_MAX_AGE_MS",
    "LAUNCHPAD__ENDPOINTS__DEVNET",
    "LAUNCHPAD__LOGGING__FORMAT",
];

fn clear_overrides() {
    for key in OVERRIDE_KEYS {
        std::env::remove_var(key);
    }
}

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("launchpad-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, contents).expect("temp config should be writable");
    path
}

#[test]
#[serial]
fn test_file_values_apply() {
    clear_overrides();
    let path = write_config(
        "file",
        r#"
[endpoints]
devnet = ["https://devnet-a.example", "https://devnet-b.example"]

[retry]
max_attempts = 4
attempt_timeout_ms = 15000

[blacklist]
rate_limit_cooldown_ms = 90000
"#,
    );

    let config = AppConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.endpoints.devnet.len(), 2);
    assert_eq!(config.retry.max_attempts, 4);
    assert_eq!(config.retry.attempt_timeout(), Duration::from_secs(15));
    assert_eq!(config.blacklist.rate_limit_cooldown_ms, 90_000);
    assert_eq!(config.blacklist.connection_cooldown_ms, 30_000, "unset keys keep defaults");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_overrides();
    let path = write_config(
        "env",
        r#"
[retry]
max_attempts = 4
"#,
    );

    std::env::set_var("LAUNCHPAD__RETRY__MAX_ATTEMPTS", "8");
    std::env::set_var("LAUNCHPAD__BALANCE__CACHE_MAX_AGE_MS", "2500");
    std::env::set_var(
        "LAUNCHPAD__ENDPOINTS__DEVNET",
        "https://env-a.example,https://env-b.example,https://env-c.example",
    );
    std::env::set_var("LAUNCHPAD__LOGGING__FORMAT", "json");

    let result = AppConfig::from_file(&path);
    clear_overrides();
    std::fs::remove_file(&path).ok();

    let config = result.unwrap();
    assert_eq!(config.retry.max_attempts, 8);
    assert_eq!(config.cache_max_age(), Duration::from_millis(2_500));
    assert_eq!(
        config.endpoints.devnet,
        vec![
            "https://env-a.example".to_string(),
            "https://env-b.example".to_string(),
            "https://env-c.example".to_string(),
        ]
    );
    assert_eq!(config.logging.format, "json");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_overrides();
    let config = AppConfig::from_file("definitely/not/here.toml").unwrap();

    let defaults = AppConfig::default();
    assert_eq!(config.endpoints.devnet, defaults.endpoints.devnet);
    assert_eq!(config.retry.max_attempts, defaults.retry.max_attempts);
    assert_eq!(config.logging.format, "pretty");
}

#[test]
#[serial]
fn test_malformed_file_is_an_error() {
    clear_overrides();
    let path = write_config("broken", "[retry\nmax_attempts = ");

    let result = AppConfig::from_file(&path);
    std::fs::remove_file(&path).ok();

    assert!(result.is_err());
}
