//! Application configuration with layered loading.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: Hardcoded in struct `Default` implementations
//! 2. **Config file**: TOML file specified by `LAUNCHPAD_CONFIG` env var
//! 3. **Environment variables**: `LAUNCHPAD__*` env vars override specific fields
//!
//! # Configuration Sections
//!
//! - [`EndpointsConfig`]: ordered RPC endpoint lists per network
//! - [`BalanceConfig`]: cache max age, debounce window, unit threshold
//! - [`RetryConfig`]: attempt budget, per-attempt timeout, backoff curve
//! - [`BlacklistConfig`]: cooldowns per failure kind and the periodic reset interval
//! - [`AuthConfig`]: sign-in challenge and session lifetimes
//! - [`HttpConfig`]: HTTP client concurrency and connect timeout
//! - [`LoggingConfig`]: Log level and format
//!
//! # Example
//!
//! ```toml
//! [endpoints]
//! devnet = ["https://api.devnet.solana.com"]
//! mainnet_beta = ["https://api.mainnet-beta.solana.com", "https://rpc.ankr.com/solana"]
//!
//! [retry]
//! max_attempts = 6
//! base_delay_ms = 1000
//! ```

use crate::{types::Network, upstream::errors::FailureKind};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Ordered candidate RPC endpoints for each network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub devnet: Vec<String>,
    pub mainnet_beta: Vec<String>,
}

impl EndpointsConfig {
    #[must_use]
    pub fn for_network(&self, network: Network) -> &[String] {
        match network {
            Network::Devnet => &self.devnet,
            Network::MainnetBeta => &self.mainnet_beta,
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            devnet: vec![
                "https://api.devnet.solana.com".to_string(),
                "https://rpc.ankr.com/solana_devnet".to_string(),
            ],
            mainnet_beta: vec![
                "https://api.mainnet-beta.solana.com".to_string(),
                "https://solana-mainnet.g.alchemy.com/v2/demo".to_string(),
                "https://rpc.ankr.com/solana".to_string(),
            ],
        }
    }
}

/// Balance cache and refresh gating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Cached balances older than this are treated as absent. Defaults to `10000`.
    pub cache_max_age_ms: u64,

    /// Untyped balance inputs strictly above this value are taken as lamports.
    /// Defaults to `1000000`.
    pub lamport_threshold: f64,

    /// Non-forced refreshes started within this window of the previous one are skipped.
    /// Defaults to `3000`.
    pub debounce_ms: u64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self { cache_max_age_ms: 10_000, lamport_threshold: 1_000_000.0, debounce_ms: 3_000 }
    }
}

/// Retry and backoff settings for a single balance refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per refresh before giving up. Defaults to `6`.
    pub max_attempts: u32,

    /// Delay before the second attempt. Defaults to `1000`.
    pub base_delay_ms: u64,

    /// Upper bound on any single backoff delay. Defaults to `10000`.
    pub max_delay_ms: u64,

    /// Growth factor applied per attempt. Defaults to `1.5`.
    pub backoff_multiplier: f64,

    /// Each attempt is abandoned after this long. Defaults to `30000`.
    pub attempt_timeout_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            base_delay_ms: 1_000,
            max_delay_ms: 10_000,
            backoff_multiplier: 1.5,
            attempt_timeout_ms: 30_000,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    #[must_use]
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    #[must_use]
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }
}

/// Endpoint cooldown settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlacklistConfig {
    /// Cooldown after a rate-limit response. Defaults to `60000`.
    pub rate_limit_cooldown_ms: u64,

    /// Cooldown after a connection failure or timeout. Defaults to `30000`.
    pub connection_cooldown_ms: u64,

    /// Interval of the full blacklist reset. Defaults to `300`.
    pub sweep_interval_seconds: u64,
}

impl Default for BlacklistConfig {
    fn default() -> Self {
        Self {
            rate_limit_cooldown_ms: 60_000,
            connection_cooldown_ms: 30_000,
            sweep_interval_seconds: 300,
        }
    }
}

impl BlacklistConfig {
    /// Returns how long an endpoint sits out after a failure of the given kind.
    ///
    /// `None` means the failure is not attributed to the endpoint.
    #[must_use]
    pub fn cooldown_for(&self, kind: FailureKind) -> Option<Duration> {
        match kind {
            FailureKind::RateLimit => Some(Duration::from_millis(self.rate_limit_cooldown_ms)),
            _ if kind.blames_endpoint() => Some(Duration::from_millis(self.connection_cooldown_ms)),
            _ => None,
        }
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

/// Wallet sign-in settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Domain embedded in the sign-in message. Defaults to `"launchpad.local"`.
    pub domain: String,

    /// Seconds a sign-in challenge stays valid. Defaults to `300`.
    pub challenge_ttl_seconds: u64,

    /// Seconds an authenticated session stays valid. Defaults to `86400`.
    pub session_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: "launchpad.local".to_string(),
            challenge_ttl_seconds: 300,
            session_ttl_seconds: 86_400,
        }
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Maximum number of in-flight HTTP requests. Defaults to `64`.
    pub concurrent_limit: usize,

    /// TCP connect timeout. Defaults to `5000`.
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { concurrent_limit: 64, connect_timeout_ms: 5_000 }
    }
}

/// Application logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (e.g., "trace", "debug", "info", "warn", "error"). Defaults to `"info"`.
    pub level: String,

    /// Output format: `"json"` or `"pretty"`. Defaults to `"pretty"`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

/// Root application configuration containing all subsystem settings.
///
/// Environment overrides use the `LAUNCHPAD` prefix with `__` as separator, for
/// example `LAUNCHPAD__RETRY__MAX_ATTEMPTS=8`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoints: EndpointsConfig,
    pub balance: BalanceConfig,
    pub retry: RetryConfig,
    pub blacklist: BlacklistConfig,
    pub auth: AuthConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file with environment variable overrides.
    ///
    /// A missing file is not an error; compiled defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be parsed or deserialized.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("LAUNCHPAD")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("endpoints.devnet")
                    .with_list_parse_key("endpoints.mainnet_beta"),
            )
            .build()?
            .try_deserialize()
    }

    /// Loads configuration from `config/config.toml`, or the path in `LAUNCHPAD_CONFIG`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("LAUNCHPAD_CONFIG").unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    #[must_use]
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_millis(self.balance.cache_max_age_ms)
    }

    #[must_use]
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.balance.debounce_ms)
    }

    /// Validates the configuration for correctness and consistency.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        for network in Network::ALL {
            let endpoints = self.endpoints.for_network(network);
            if endpoints.is_empty() {
                return Err(format!("No RPC endpoints configured for {network}"));
            }
            for endpoint in endpoints {
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                    return Err(format!("Invalid RPC endpoint for {network}: {endpoint}"));
                }
            }
        }

        if self.retry.max_attempts == 0 {
            return Err("Retry max_attempts must be greater than 0".to_string());
        }

        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err("Retry base_delay_ms must not exceed max_delay_ms".to_string());
        }

        if self.retry.backoff_multiplier < 1.0 {
            return Err("Retry backoff_multiplier must be at least 1.0".to_string());
        }

        if self.retry.attempt_timeout_ms == 0 {
            return Err("Retry attempt_timeout_ms must be greater than 0".to_string());
        }

        if self.blacklist.sweep_interval_seconds == 0 {
            return Err("Blacklist sweep interval must be greater than 0".to_string());
        }

        if self.http.concurrent_limit == 0 {
            return Err("HTTP concurrent_limit must be greater than 0".to_string());
        }

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err("Logging format must be 'json' or 'pretty'".to_string());
        }

        Ok(())
    }
}
