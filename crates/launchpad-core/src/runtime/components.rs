//! Core component container for the launchpad runtime.

use crate::{
    auth::SessionStore,
    balance::BalanceRefresher,
    cache::BalanceCache,
    upstream::{Blacklist, EndpointSelector},
};
use std::sync::Arc;

/// Container for the initialized session components.
///
/// The blacklist and cache are shared by reference between the selector, the
/// refresher and the background sweeper, so all of them observe the same state.
#[derive(Clone)]
pub struct LaunchpadComponents {
    blacklist: Arc<Blacklist>,
    selector: Arc<EndpointSelector>,
    cache: Arc<BalanceCache>,
    refresher: Arc<BalanceRefresher>,
    sessions: Arc<SessionStore>,
}

impl LaunchpadComponents {
    #[must_use]
    pub fn new(
        blacklist: Arc<Blacklist>,
        selector: Arc<EndpointSelector>,
        cache: Arc<BalanceCache>,
        refresher: Arc<BalanceRefresher>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self { blacklist, selector, cache, refresher, sessions }
    }

    #[must_use]
    pub fn blacklist(&self) -> &Arc<Blacklist> {
        &self.blacklist
    }

    #[must_use]
    pub fn selector(&self) -> &Arc<EndpointSelector> {
        &self.selector
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<BalanceCache> {
        &self.cache
    }

    #[must_use]
    pub fn refresher(&self) -> &Arc<BalanceRefresher> {
        &self.refresher
    }

    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }
}
