use ahash::RandomState;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{trace, warn};

use crate::{
    config::BalanceConfig,
    types::{lamports_to_sol, Network, LAMPORTS_PER_SOL},
};

#[derive(Debug, Clone, Copy)]
struct CachedBalance {
    /// Whole SOL.
    balance: f64,
    stored_at: Instant,
}

/// Short-lived cache of last-known balances keyed by `(account, network)`.
///
/// Freshness is checked on read; stale entries stay in the map until the next
/// successful fetch for the same key overwrites them. Values are always stored in
/// whole SOL.
pub struct BalanceCache {
    entries: DashMap<(Network, String), CachedBalance, RandomState>,
    max_age: Duration,
    lamport_threshold: f64,
}

impl BalanceCache {
    #[must_use]
    pub fn new(max_age: Duration, lamport_threshold: f64) -> Self {
        Self { entries: DashMap::with_hasher(RandomState::new()), max_age, lamport_threshold }
    }

    #[must_use]
    pub fn from_config(config: &BalanceConfig) -> Self {
        Self::new(Duration::from_millis(config.cache_max_age_ms), config.lamport_threshold)
    }

    /// Returns the cached balance if it is younger than the max age.
    #[must_use]
    pub fn get(&self, account: &str, network: Network) -> Option<f64> {
        let entry = *self.entries.get(&(network, account.to_string()))?;
        if entry.stored_at.elapsed() >= self.max_age {
            trace!(account = account, network = %network, "cached balance expired");
            return None;
        }
        Some(entry.balance)
    }

    /// Stores a balance of unknown unit.
    ///
    /// Values strictly above the lamport threshold are taken as lamports and converted
    /// to SOL; anything else is stored as-is. Returns the stored value, or `None` if
    /// the input was negative or not finite.
    pub fn set(&self, account: &str, network: Network, raw: f64) -> Option<f64> {
        if !raw.is_finite() || raw < 0.0 {
            warn!(account = account, network = %network, raw = raw, "ignoring invalid balance");
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let balance =
            if raw > self.lamport_threshold { raw / LAMPORTS_PER_SOL as f64 } else { raw };
        self.insert(account, network, balance);
        Some(balance)
    }

    /// Stores a balance reported in lamports. Returns the stored SOL value.
    pub fn set_lamports(&self, account: &str, network: Network, lamports: u64) -> f64 {
        let balance = lamports_to_sol(lamports);
        self.insert(account, network, balance);
        balance
    }

    fn insert(&self, account: &str, network: Network, balance: f64) {
        self.entries.insert(
            (network, account.to_string()),
            CachedBalance { balance, stored_at: Instant::now() },
        );
    }

    #[must_use]
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
