//! Test Helper Functions and Utilities
//!
//! Configuration and runtime fixtures shared by the integration tests.

use launchpad_core::{config::AppConfig, runtime::LaunchpadRuntime};

/// An endpoint nothing listens on.
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:1";

/// Creates a configuration with the given devnet endpoints and retry timing shrunk to
/// milliseconds so exhausted refreshes finish quickly.
#[must_use]
pub fn fast_retry_config(devnet: Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();
    config.endpoints.devnet = devnet;
    config.endpoints.mainnet_beta = vec!["https://mainnet.invalid".to_string()];
    config.retry.max_attempts = 3;
    config.retry.base_delay_ms = 5;
    config.retry.max_delay_ms = 20;
    config.retry.attempt_timeout_ms = 2_000;
    config.http.connect_timeout_ms = 500;
    config
}

/// Builds a runtime over the default HTTP transport without the background sweeper.
///
/// # Panics
///
/// Panics if the configuration is invalid.
#[must_use]
pub fn http_runtime(config: AppConfig) -> LaunchpadRuntime {
    LaunchpadRuntime::builder()
        .with_config(config)
        .disable_sweeper()
        .build()
        .expect("test runtime should build")
}
