//! Cache and debounce behavior of the refresher over HTTP.

use crate::mock_infrastructure::{fast_retry_config, http_runtime, RpcMockBuilder};
use launchpad_core::types::{ConnectionState, Network};
use std::time::Duration;

const ACCOUNT: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

#[tokio::test]
async fn test_fresh_cache_serves_non_forced_refresh() {
    let mut endpoint = RpcMockBuilder::new().await;
    endpoint.mock_get_balance(4_000_000_000, 2);

    let runtime = http_runtime(fast_retry_config(vec![endpoint.url()]));
    let refresher = runtime.refresher();

    refresher.refresh_balance(ACCOUNT, Network::Devnet, false).await;
    refresher.refresh_balance(ACCOUNT, Network::Devnet, false).await;
    assert_eq!(runtime.cache().get(ACCOUNT, Network::Devnet), Some(4.0));

    // Forced refreshes always go to the network.
    refresher.refresh_balance(ACCOUNT, Network::Devnet, true).await;
    assert_eq!(refresher.snapshot().wallet_balance, Some(4.0));

    endpoint.assert_all().await;
    runtime.shutdown().await;
}

#[tokio::test]
async fn test_debounce_without_cache() {
    let mut endpoint = RpcMockBuilder::new().await;
    endpoint.mock_get_balance(1_000_000_000, 1);

    let mut config = fast_retry_config(vec![endpoint.url()]);
    config.balance.cache_max_age_ms = 0;
    let runtime = http_runtime(config);

    for _ in 0..5 {
        runtime.refresher().refresh_balance(ACCOUNT, Network::Devnet, false).await;
    }

    endpoint.assert_all().await;
    runtime.shutdown().await;
}

#[tokio::test]
async fn test_cache_is_scoped_per_network() {
    let mut devnet = RpcMockBuilder::new().await;
    devnet.mock_get_balance(1_000_000_000, 1);
    let mut mainnet = RpcMockBuilder::new().await;
    mainnet.mock_get_balance(9_000_000_000, 1);

    let mut config = fast_retry_config(vec![devnet.url()]);
    config.endpoints.mainnet_beta = vec![mainnet.url()];
    config.balance.debounce_ms = 0;
    let runtime = http_runtime(config);

    runtime.refresher().refresh_balance(ACCOUNT, Network::Devnet, false).await;
    runtime.refresher().refresh_balance(ACCOUNT, Network::MainnetBeta, false).await;

    assert_eq!(runtime.cache().get(ACCOUNT, Network::Devnet), Some(1.0));
    assert_eq!(runtime.cache().get(ACCOUNT, Network::MainnetBeta), Some(9.0));

    devnet.assert_all().await;
    mainnet.assert_all().await;
    runtime.shutdown().await;
}

#[tokio::test]
async fn test_snapshot_watchers_are_notified() {
    let mut endpoint = RpcMockBuilder::new().await;
    endpoint.mock_get_balance(6_000_000_000, 1);

    let runtime = http_runtime(fast_retry_config(vec![endpoint.url()]));
    let refresher = runtime.refresher();
    let mut rx = refresher.subscribe();
    assert_eq!(rx.borrow().wallet_balance, None);

    let watcher = tokio::spawn(async move {
        loop {
            rx.changed().await.expect("sender alive");
            let snapshot = rx.borrow_and_update().clone();
            if snapshot.wallet_balance.is_some() {
                return snapshot;
            }
        }
    });

    refresher.refresh_balance(ACCOUNT, Network::Devnet, true).await;

    let snapshot = tokio::time::timeout(Duration::from_secs(5), watcher)
        .await
        .expect("watcher should observe the update")
        .expect("watcher task should not panic");
    assert_eq!(snapshot.wallet_balance, Some(6.0));
    assert!(!snapshot.is_loading_balance);
    assert_eq!(snapshot.connection_state, ConnectionState::Connected);

    runtime.shutdown().await;
}
