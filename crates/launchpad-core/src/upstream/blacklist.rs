//! Per-network endpoint cooldowns.
//!
//! An endpoint that fails with a rate-limit or connection error is benched until its
//! cooldown expires. Expiry is evaluated lazily against the stored deadline, so no
//! timers are scheduled per entry. A periodic full reset (see
//! [`runtime::background`](crate::runtime::background)) additionally clears everything
//! so an endpoint is never excluded for longer than one sweep interval.

use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::types::Network;

/// Tracks which endpoints are cooling down, keyed by network.
#[derive(Debug, Default)]
pub struct Blacklist {
    entries: RwLock<HashMap<Network, HashMap<Arc<str>, Instant>>>,
}

impl Blacklist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Benches `endpoint` on `network` for `cooldown`.
    ///
    /// Re-adding an entry replaces its deadline.
    pub fn add(&self, network: Network, endpoint: &str, cooldown: Duration) {
        let until = Instant::now() + cooldown;
        self.entries.write().entry(network).or_default().insert(Arc::from(endpoint), until);

        info!(
            network = %network,
            endpoint = endpoint,
            cooldown_ms = u64::try_from(cooldown.as_millis()).unwrap_or(u64::MAX),
            "endpoint blacklisted"
        );
    }

    /// Clears one entry, or the whole network when `endpoint` is `None`.
    pub fn remove(&self, network: Network, endpoint: Option<&str>) {
        let mut entries = self.entries.write();
        match endpoint {
            Some(endpoint) => {
                if let Some(set) = entries.get_mut(&network) {
                    set.remove(endpoint);
                }
                debug!(network = %network, endpoint = endpoint, "endpoint removed from blacklist");
            }
            None => {
                entries.remove(&network);
                debug!(network = %network, "blacklist cleared for network");
            }
        }
    }

    /// Returns `true` if the endpoint's cooldown has not yet elapsed.
    #[must_use]
    pub fn is_blacklisted(&self, network: Network, endpoint: &str) -> bool {
        self.remaining(network, endpoint).is_some()
    }

    /// Returns the time left on an active cooldown.
    #[must_use]
    pub fn remaining(&self, network: Network, endpoint: &str) -> Option<Duration> {
        let entries = self.entries.read();
        let until = *entries.get(&network)?.get(endpoint)?;
        let now = Instant::now();
        (now < until).then(|| until - now)
    }

    /// Lists endpoints currently cooling down on `network`.
    #[must_use]
    pub fn active(&self, network: Network) -> Vec<String> {
        let now = Instant::now();
        let entries = self.entries.read();
        let mut active: Vec<String> = entries
            .get(&network)
            .map(|set| {
                set.iter()
                    .filter(|(_, until)| now < **until)
                    .map(|(endpoint, _)| endpoint.to_string())
                    .collect()
            })
            .unwrap_or_default();
        active.sort();
        active
    }

    /// Clears every network.
    pub fn clear_all(&self) {
        let mut entries = self.entries.write();
        let cleared: usize = entries.values().map(HashMap::len).sum();
        entries.clear();
        if cleared > 0 {
            info!(cleared = cleared, "blacklist reset");
        }
    }
}
