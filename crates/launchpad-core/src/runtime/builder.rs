//! Builder pattern for initializing the launchpad runtime.

use crate::{
    auth::SessionStore,
    balance::{BalanceRefresher, RefresherConfig},
    cache::BalanceCache,
    config::AppConfig,
    upstream::{
        BalanceTransport, Blacklist, EndpointSelector, HttpBalanceTransport, HttpClient,
        HttpClientConfig,
    },
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{lifecycle::LaunchpadRuntime, LaunchpadComponents};

/// Errors that can occur during runtime initialization.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    /// Generic initialization error
    #[error("Runtime initialization failed: {0}")]
    Initialization(String),
}

#[derive(Clone)]
struct RuntimeOptions {
    enable_sweeper: bool,
    shutdown_channel_capacity: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self { enable_sweeper: true, shutdown_channel_capacity: 16 }
    }
}

/// Builder for constructing a [`LaunchpadRuntime`].
///
/// Without [`with_transport`](Self::with_transport) the runtime talks JSON-RPC over
/// HTTP using the `[http]` and `[retry]` configuration sections.
///
/// # Examples
///
/// ```no_run
/// # use launchpad_core::{config::AppConfig, runtime::LaunchpadRuntimeBuilder};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let runtime = LaunchpadRuntimeBuilder::new().with_config(AppConfig::load()?).build()?;
/// # runtime.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct LaunchpadRuntimeBuilder {
    config: Option<AppConfig>,
    transport: Option<Arc<dyn BalanceTransport>>,
    options: RuntimeOptions,
}

impl LaunchpadRuntimeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { config: None, transport: None, options: RuntimeOptions::default() }
    }

    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the default HTTP transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn BalanceTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Disables the periodic blacklist reset and session sweep.
    #[must_use]
    pub fn disable_sweeper(mut self) -> Self {
        self.options.enable_sweeper = false;
        self
    }

    /// Sets custom shutdown channel capacity (default: 16).
    #[must_use]
    pub fn with_shutdown_channel_capacity(mut self, capacity: usize) -> Self {
        self.options.shutdown_channel_capacity = capacity;
        self
    }

    /// Builds the runtime and starts background tasks.
    ///
    /// Must be called from within a tokio runtime when the sweeper is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError`] if configuration is missing or invalid, or the HTTP
    /// client cannot be built.
    pub fn build(self) -> Result<LaunchpadRuntime, RuntimeError> {
        let config = self.config.ok_or_else(|| {
            RuntimeError::ConfigValidation("No configuration provided".to_string())
        })?;

        config.validate().map_err(RuntimeError::ConfigValidation)?;

        info!(
            devnet_endpoints = config.endpoints.devnet.len(),
            mainnet_beta_endpoints = config.endpoints.mainnet_beta.len(),
            sweeper_enabled = self.options.enable_sweeper,
            "Initializing launchpad runtime"
        );

        let (shutdown_tx, _) = broadcast::channel::<()>(self.options.shutdown_channel_capacity);

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http_client = HttpClient::with_config(HttpClientConfig::from(&config.http))
                    .map_err(|e| RuntimeError::Initialization(format!("HTTP client: {e}")))?;
                debug!("HTTP transport initialized");
                Arc::new(HttpBalanceTransport::new(
                    Arc::new(http_client),
                    config.retry.attempt_timeout(),
                ))
            }
        };

        let blacklist = Arc::new(Blacklist::new());
        let selector =
            Arc::new(EndpointSelector::from_config(&config.endpoints, Arc::clone(&blacklist)));
        let cache = Arc::new(BalanceCache::from_config(&config.balance));
        let refresher = Arc::new(BalanceRefresher::new(
            transport,
            Arc::clone(&selector),
            Arc::clone(&blacklist),
            Arc::clone(&cache),
            RefresherConfig::from_app_config(&config),
        ));
        let sessions = Arc::new(SessionStore::new(&config.auth));
        debug!("Balance refresher and session store initialized");

        let components = LaunchpadComponents::new(blacklist, selector, cache, refresher, sessions);
        let runtime =
            LaunchpadRuntime::new(components, shutdown_tx, config, self.options.enable_sweeper);

        info!("Launchpad runtime initialization complete");

        Ok(runtime)
    }
}

impl Default for LaunchpadRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
