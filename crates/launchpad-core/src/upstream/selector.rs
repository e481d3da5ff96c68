use std::{collections::HashMap, sync::Arc};
use tracing::warn;

use crate::{
    config::EndpointsConfig,
    types::Network,
    upstream::{blacklist::Blacklist, UpstreamError},
};

/// Picks the next usable endpoint for a network.
///
/// Selection is deterministic given the blacklist state:
/// 1. The endpoint at `preferred_index mod len`, if it is not cooling down.
/// 2. Otherwise the first endpoint after it (circularly) that is not cooling down.
/// 3. If every endpoint is cooling down, the network's blacklist is cleared and the
///    endpoint after the preferred one is returned, so selection never starves.
pub struct EndpointSelector {
    endpoints: HashMap<Network, Arc<[Arc<str>]>>,
    blacklist: Arc<Blacklist>,
}

impl EndpointSelector {
    #[must_use]
    pub fn new<I, S>(endpoints: I, blacklist: Arc<Blacklist>) -> Self
    where
        I: IntoIterator<Item = (Network, Vec<S>)>,
        S: AsRef<str>,
    {
        let endpoints = endpoints
            .into_iter()
            .map(|(network, list)| {
                let list: Arc<[Arc<str>]> =
                    list.iter().map(|s| Arc::<str>::from(s.as_ref())).collect();
                (network, list)
            })
            .collect();
        Self { endpoints, blacklist }
    }

    #[must_use]
    pub fn from_config(config: &EndpointsConfig, blacklist: Arc<Blacklist>) -> Self {
        Self::new(
            Network::ALL.map(|network| (network, config.for_network(network).to_vec())),
            blacklist,
        )
    }

    /// Returns the configured endpoints for `network`, in order.
    #[must_use]
    pub fn endpoints(&self, network: Network) -> &[Arc<str>] {
        self.endpoints.get(&network).map(|list| &list[..]).unwrap_or(&[])
    }

    /// Selects an endpoint, starting from `preferred_index`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::NoEndpoints`] if the network has no endpoints configured.
    pub fn select(
        &self,
        network: Network,
        preferred_index: usize,
    ) -> Result<(Arc<str>, usize), UpstreamError> {
        let endpoints = self.endpoints(network);
        let len = endpoints.len();
        if len == 0 {
            return Err(UpstreamError::NoEndpoints(network));
        }

        let start = preferred_index % len;
        for offset in 0..len {
            let index = (start + offset) % len;
            if !self.blacklist.is_blacklisted(network, &endpoints[index]) {
                return Ok((Arc::clone(&endpoints[index]), index));
            }
        }

        warn!(
            network = %network,
            endpoints = len,
            "all endpoints blacklisted, clearing blacklist for network"
        );
        self.blacklist.remove(network, None);

        let index = (start + 1) % len;
        Ok((Arc::clone(&endpoints[index]), index))
    }
}
