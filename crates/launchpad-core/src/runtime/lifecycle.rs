//! Runtime lifecycle management including background tasks and graceful shutdown.

use crate::{
    auth::SessionStore,
    balance::BalanceRefresher,
    cache::BalanceCache,
    config::AppConfig,
    upstream::{Blacklist, EndpointSelector},
};
use std::sync::Arc;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, error, info, warn};

use super::{background, builder::LaunchpadRuntimeBuilder, LaunchpadComponents};

/// Owns the session components and their background tasks.
///
/// Dropping the runtime without calling [`shutdown`](Self::shutdown) leaves the
/// sweeper running until the tokio runtime itself stops.
pub struct LaunchpadRuntime {
    components: LaunchpadComponents,
    shutdown_tx: broadcast::Sender<()>,
    config: AppConfig,
    sweeper_task: Option<JoinHandle<()>>,
}

impl LaunchpadRuntime {
    #[must_use]
    pub fn builder() -> LaunchpadRuntimeBuilder {
        LaunchpadRuntimeBuilder::new()
    }

    /// Called by [`LaunchpadRuntimeBuilder`] once components are initialized.
    pub(super) fn new(
        components: LaunchpadComponents,
        shutdown_tx: broadcast::Sender<()>,
        config: AppConfig,
        enable_sweeper: bool,
    ) -> Self {
        let sweeper_task = enable_sweeper.then(|| {
            let handle = tokio::spawn(background::run_sweeper(
                Arc::clone(components.blacklist()),
                Arc::clone(components.sessions()),
                config.blacklist.sweep_interval(),
                shutdown_tx.subscribe(),
            ));
            debug!(
                interval_seconds = config.blacklist.sweep_interval_seconds,
                "Sweeper task started"
            );
            handle
        });

        Self { components, shutdown_tx, config, sweeper_task }
    }

    #[must_use]
    pub fn components(&self) -> &LaunchpadComponents {
        &self.components
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn refresher(&self) -> &Arc<BalanceRefresher> {
        self.components.refresher()
    }

    #[must_use]
    pub fn selector(&self) -> &Arc<EndpointSelector> {
        self.components.selector()
    }

    #[must_use]
    pub fn blacklist(&self) -> &Arc<Blacklist> {
        self.components.blacklist()
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<BalanceCache> {
        self.components.cache()
    }

    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionStore> {
        self.components.sessions()
    }

    #[must_use]
    pub fn has_sweeper(&self) -> bool {
        self.sweeper_task.is_some()
    }

    /// Creates a new shutdown receiver for external shutdown coordination.
    #[must_use]
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signals background tasks to stop and waits for them to finish.
    pub async fn shutdown(self) {
        info!("Initiating launchpad runtime shutdown");
        if let Err(e) = self.shutdown_tx.send(()) {
            warn!(error = %e, "Failed to send shutdown signal (no receivers)");
        }

        if let Some(sweeper_task) = self.sweeper_task {
            match sweeper_task.await {
                Ok(()) => debug!("Sweeper task completed"),
                Err(e) if e.is_cancelled() => debug!("Sweeper task cancelled"),
                Err(e) => error!(error = %e, "Sweeper task failed"),
            }
        }

        info!("Launchpad runtime shutdown complete");
    }
}
