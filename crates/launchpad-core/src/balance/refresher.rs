//! Balance refresh driver.
//!
//! # Refresh Flow
//!
//! ```text
//! refresh_balance(account, network, force)
//!   │
//!   ├─ !force && cache fresh ──────────→ publish cached value, Connected
//!   ├─ !force && same account inside debounce → skip
//!   │
//!   └─ select endpoint → attempt loop (max_attempts)
//!        │   timeout(attempt_timeout, transport.get_balance)
//!        ├─ Ok  → cache, reset failures, Connected
//!        └─ Err → classify → cooldown + reselect (rate limit / connection / timeout)
//!                          → sleep(backoff.delay_for(n))
//!      exhausted → failures += 1 → Unstable (2) / Failed (3+, notify)
//! ```
//!
//! The refresh never returns an error. Callers observe outcomes through the
//! [`BalanceSnapshot`] watch channel and the notification broadcast.

use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{
    sync::{broadcast, watch},
    time::Instant,
};
use tracing::{debug, info, warn};

use crate::{
    cache::BalanceCache,
    config::{AppConfig, BlacklistConfig},
    types::{BalanceSnapshot, ConnectionState, Network, Notification, NotificationLevel},
    upstream::{BackoffPolicy, BalanceTransport, Blacklist, EndpointSelector, UpstreamError},
};

const NOTIFICATION_CAPACITY: usize = 32;

/// Tuning for [`BalanceRefresher`].
#[derive(Debug, Clone)]
pub struct RefresherConfig {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub debounce: Duration,
    pub backoff: BackoffPolicy,
    pub cooldowns: BlacklistConfig,
}

impl Default for RefresherConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

impl RefresherConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_attempts: config.retry.max_attempts.max(1),
            attempt_timeout: config.retry.attempt_timeout(),
            debounce: config.debounce_window(),
            backoff: BackoffPolicy::from(&config.retry),
            cooldowns: config.blacklist.clone(),
        }
    }
}

/// Per-call retry bookkeeping, dropped when the call resolves.
#[derive(Debug)]
struct RetryContext {
    attempt: u32,
    delay: Duration,
    last_error: Option<UpstreamError>,
}

impl RetryContext {
    fn new(base_delay: Duration) -> Self {
        Self { attempt: 0, delay: base_delay, last_error: None }
    }
}

struct Fetched {
    lamports: u64,
    endpoint: Arc<str>,
}

#[derive(Debug, Default)]
struct RefreshState {
    preferred_index: HashMap<Network, usize>,
    consecutive_failures: u32,
    last_attempt: HashMap<(Network, String), Instant>,
    connection_state: ConnectionState,
}

/// Drives balance refreshes across rotating endpoints.
///
/// One instance per session. Shared collaborators (selector, blacklist, cache) are
/// passed in so several refreshers, or tests, can be wired independently.
pub struct BalanceRefresher {
    transport: Arc<dyn BalanceTransport>,
    selector: Arc<EndpointSelector>,
    blacklist: Arc<Blacklist>,
    cache: Arc<BalanceCache>,
    config: RefresherConfig,
    state: Mutex<RefreshState>,
    snapshot_tx: watch::Sender<BalanceSnapshot>,
    notification_tx: broadcast::Sender<Notification>,
}

impl BalanceRefresher {
    #[must_use]
    pub fn new(
        transport: Arc<dyn BalanceTransport>,
        selector: Arc<EndpointSelector>,
        blacklist: Arc<Blacklist>,
        cache: Arc<BalanceCache>,
        config: RefresherConfig,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(BalanceSnapshot::default());
        let (notification_tx, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            transport,
            selector,
            blacklist,
            cache,
            config,
            state: Mutex::new(RefreshState::default()),
            snapshot_tx,
            notification_tx,
        }
    }

    /// Subscribes to snapshot updates. The receiver starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BalanceSnapshot> {
        self.snapshot_tx.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> BalanceSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
        self.notification_tx.subscribe()
    }

    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.state.lock().connection_state
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.state.lock().consecutive_failures
    }

    /// Returns the index the next refresh on `network` will try first.
    #[must_use]
    pub fn preferred_index(&self, network: Network) -> usize {
        self.state.lock().preferred_index.get(&network).copied().unwrap_or(0)
    }

    /// Refreshes the balance of `account` on `network`.
    ///
    /// Non-forced calls are served from a fresh cache entry when one exists, and are
    /// skipped when a network attempt for the same account and network started within
    /// the debounce window.
    pub async fn refresh_balance(&self, account: &str, network: Network, force: bool) {
        if !force {
            if let Some(balance) = self.cache.get(account, network) {
                debug!(account = account, network = %network, "serving balance from cache");
                self.state.lock().connection_state = ConnectionState::Connected;
                self.snapshot_tx.send_modify(|snapshot| {
                    snapshot.retarget(account, network);
                    snapshot.wallet_balance = Some(balance);
                    snapshot.is_loading_balance = false;
                    snapshot.connection_state = ConnectionState::Connected;
                });
                return;
            }
        }

        {
            let now = Instant::now();
            let key = (network, account.to_string());
            let mut state = self.state.lock();
            if !force {
                if let Some(last) = state.last_attempt.get(&key).copied() {
                    if now.duration_since(last) < self.config.debounce {
                        debug!(
                            account = account,
                            network = %network,
                            "refresh skipped, previous attempt inside debounce window"
                        );
                        return;
                    }
                }
            }
            state.last_attempt.insert(key, now);
        }

        self.snapshot_tx.send_modify(|snapshot| {
            snapshot.retarget(account, network);
            snapshot.is_loading_balance = true;
        });

        match self.fetch_with_retry(account, network).await {
            Ok(fetched) => self.record_success(account, network, &fetched),
            Err(context) => self.record_exhaustion(account, network, &context),
        }
    }

    /// Advances the preferred endpoint for `network` and optimistically resets health.
    pub fn switch_endpoint(&self, network: Network) {
        let len = self.selector.endpoints(network).len();
        let index = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let current = state.preferred_index.get(&network).copied().unwrap_or(0);
            let next = if len == 0 { 0 } else { (current + 1) % len };
            state.preferred_index.insert(network, next);
            state.consecutive_failures = 0;
            state.connection_state = ConnectionState::Connected;
            next
        };

        let endpoint = self.selector.endpoints(network).get(index).map(ToString::to_string);
        info!(network = %network, index = index, endpoint = ?endpoint, "switched rpc endpoint");

        self.snapshot_tx
            .send_modify(|snapshot| snapshot.connection_state = ConnectionState::Connected);
        self.notify(
            NotificationLevel::Info,
            "Endpoint Switched",
            format!("Now using {} for {network}", endpoint.as_deref().unwrap_or("no endpoint")),
        );
    }

    async fn fetch_with_retry(
        &self,
        account: &str,
        network: Network,
    ) -> Result<Fetched, RetryContext> {
        let mut context = RetryContext::new(self.config.backoff.base);

        let (mut endpoint, mut index) =
            match self.selector.select(network, self.preferred_index(network)) {
                Ok(selected) => selected,
                Err(e) => {
                    context.last_error = Some(e);
                    return Err(context);
                }
            };
        self.set_preferred_index(network, index);

        while context.attempt < self.config.max_attempts {
            let result = tokio::time::timeout(
                self.config.attempt_timeout,
                self.transport.get_balance(&endpoint, account),
            )
            .await
            .unwrap_or(Err(UpstreamError::Timeout));

            let error = match result {
                Ok(lamports) => return Ok(Fetched { lamports, endpoint }),
                Err(error) => error,
            };

            let kind = error.failure_kind();
            context.attempt += 1;
            warn!(
                network = %network,
                endpoint = %endpoint,
                attempt = context.attempt,
                max_attempts = self.config.max_attempts,
                kind = kind.as_str(),
                error = %error,
                "balance attempt failed"
            );

            if let Some(cooldown) = self.config.cooldowns.cooldown_for(kind) {
                self.blacklist.add(network, &endpoint, cooldown);
                match self.selector.select(network, index) {
                    Ok((next, next_index)) => {
                        endpoint = next;
                        index = next_index;
                        self.set_preferred_index(network, index);
                    }
                    Err(e) => {
                        context.last_error = Some(e);
                        return Err(context);
                    }
                }
            }
            context.last_error = Some(error);

            if context.attempt < self.config.max_attempts {
                context.delay = self.config.backoff.delay_for(context.attempt - 1);
                debug!(delay_ms = context.delay.as_millis() as u64, "backing off");
                tokio::time::sleep(context.delay).await;
            }
        }

        Err(context)
    }

    fn record_success(&self, account: &str, network: Network, fetched: &Fetched) {
        let balance = self.cache.set_lamports(account, network, fetched.lamports);
        {
            let mut state = self.state.lock();
            state.consecutive_failures = 0;
            state.connection_state = ConnectionState::Connected;
        }

        debug!(
            account = account,
            network = %network,
            endpoint = %fetched.endpoint,
            balance = balance,
            "balance refreshed"
        );

        self.snapshot_tx.send_modify(|snapshot| {
            snapshot.retarget(account, network);
            snapshot.wallet_balance = Some(balance);
            snapshot.is_loading_balance = false;
            snapshot.connection_state = ConnectionState::Connected;
            snapshot.endpoint = Some(fetched.endpoint.to_string());
        });
    }

    fn record_exhaustion(&self, account: &str, network: Network, context: &RetryContext) {
        let (failures, connection_state) = {
            let mut state = self.state.lock();
            state.consecutive_failures = state.consecutive_failures.saturating_add(1);
            state.connection_state = ConnectionState::for_consecutive_failures(
                state.consecutive_failures,
                state.connection_state,
            );
            (state.consecutive_failures, state.connection_state)
        };

        let last_error =
            context.last_error.as_ref().map_or_else(|| "unknown".to_string(), ToString::to_string);
        warn!(
            account = account,
            network = %network,
            attempts = context.attempt,
            consecutive_failures = failures,
            state = %connection_state,
            error = %last_error,
            "balance refresh exhausted"
        );

        self.snapshot_tx.send_modify(|snapshot| {
            snapshot.is_loading_balance = false;
            snapshot.connection_state = connection_state;
        });

        if connection_state == ConnectionState::Failed {
            self.notify(
                NotificationLevel::Error,
                "Balance Update Failed",
                format!(
                    "Could not fetch the {network} balance after {failures} tries ({last_error}). \
                     Try switching RPC endpoint."
                ),
            );
        }
    }

    fn set_preferred_index(&self, network: Network, index: usize) {
        self.state.lock().preferred_index.insert(network, index);
    }

    fn notify(&self, level: NotificationLevel, title: &str, message: String) {
        // No subscribers is fine.
        let _ = self.notification_tx.send(Notification { level, title: title.to_string(), message });
    }
}
