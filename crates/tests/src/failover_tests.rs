//! Endpoint failover over real HTTP.
//!
//! Each test stands up one mockito server per endpoint and drives the runtime's
//! refresher through the default HTTP transport, so failure classification is
//! exercised end to end: status codes and JSON-RPC error objects become typed
//! errors, typed errors become cooldowns, cooldowns steer endpoint selection.

use crate::mock_infrastructure::{
    fast_retry_config, http_runtime, RpcMockBuilder, UNREACHABLE_ENDPOINT,
};
use launchpad_core::types::{ConnectionState, Network, NotificationLevel};
use std::time::Duration;

const ACCOUNT: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

#[tokio::test]
async fn test_rate_limited_endpoint_is_benched_and_rotated() {
    let mut limited = RpcMockBuilder::new().await;
    limited.mock_rate_limited();
    let mut healthy = RpcMockBuilder::new().await;
    healthy.mock_get_balance(5_000_000_000, 1);

    let runtime = http_runtime(fast_retry_config(vec![limited.url(), healthy.url()]));
    runtime.refresher().refresh_balance(ACCOUNT, Network::Devnet, true).await;

    let snapshot = runtime.refresher().snapshot();
    assert_eq!(snapshot.wallet_balance, Some(5.0));
    assert_eq!(snapshot.connection_state, ConnectionState::Connected);
    assert_eq!(snapshot.endpoint.as_deref(), Some(healthy.url().as_str()));

    let remaining = runtime
        .blacklist()
        .remaining(Network::Devnet, &limited.url())
        .expect("rate-limited endpoint should be cooling down");
    assert!(remaining > Duration::from_secs(59) && remaining <= Duration::from_secs(60));
    assert_eq!(runtime.refresher().preferred_index(Network::Devnet), 1);

    limited.assert_all().await;
    healthy.assert_all().await;
    runtime.shutdown().await;
}

#[tokio::test]
async fn test_json_rpc_rate_limit_code_is_classified() {
    let mut limited = RpcMockBuilder::new().await;
    limited.mock_rpc_error(-32005, "Node is behind by 42 slots");
    let mut healthy = RpcMockBuilder::new().await;
    healthy.mock_get_balance(1_000_000_000, 1);

    let runtime = http_runtime(fast_retry_config(vec![limited.url(), healthy.url()]));
    runtime.refresher().refresh_balance(ACCOUNT, Network::Devnet, true).await;

    assert_eq!(runtime.refresher().snapshot().wallet_balance, Some(1.0));
    assert!(runtime.blacklist().is_blacklisted(Network::Devnet, &limited.url()));

    healthy.assert_all().await;
    runtime.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_endpoint_gets_connection_cooldown() {
    let mut healthy = RpcMockBuilder::new().await;
    healthy.mock_get_balance(2_500_000_000, 1);

    let runtime =
        http_runtime(fast_retry_config(vec![UNREACHABLE_ENDPOINT.to_string(), healthy.url()]));
    runtime.refresher().refresh_balance(ACCOUNT, Network::Devnet, true).await;

    assert_eq!(runtime.refresher().snapshot().wallet_balance, Some(2.5));
    let remaining = runtime
        .blacklist()
        .remaining(Network::Devnet, UNREACHABLE_ENDPOINT)
        .expect("unreachable endpoint should be cooling down");
    assert!(remaining > Duration::from_secs(29) && remaining <= Duration::from_secs(30));

    healthy.assert_all().await;
    runtime.shutdown().await;
}

#[tokio::test]
async fn test_unclassified_errors_stay_on_endpoint() {
    let mut broken = RpcMockBuilder::new().await;
    broken.mock_rpc_error(-32602, "Invalid param: WrongSize");
    let mut unused = RpcMockBuilder::new().await;
    unused.mock_get_balance(1, 0);

    let runtime = http_runtime(fast_retry_config(vec![broken.url(), unused.url()]));
    runtime.refresher().refresh_balance(ACCOUNT, Network::Devnet, true).await;

    let snapshot = runtime.refresher().snapshot();
    assert_eq!(snapshot.wallet_balance, None);
    assert!(!snapshot.is_loading_balance);
    assert!(runtime.blacklist().active(Network::Devnet).is_empty());
    assert_eq!(runtime.refresher().consecutive_failures(), 1);

    broken.assert_all().await;
    unused.assert_all().await;
    runtime.shutdown().await;
}

#[tokio::test]
async fn test_persistent_outage_escalates_to_failed() {
    let mut first = RpcMockBuilder::new().await;
    first.mock_http_error(503);
    let mut second = RpcMockBuilder::new().await;
    second.mock_http_error(502);

    let runtime = http_runtime(fast_retry_config(vec![first.url(), second.url()]));
    let refresher = runtime.refresher();
    let mut notifications = refresher.subscribe_notifications();

    let mut states = Vec::new();
    for _ in 0..3 {
        refresher.refresh_balance(ACCOUNT, Network::Devnet, true).await;
        states.push(refresher.connection_state());
    }

    assert_eq!(
        states,
        vec![ConnectionState::Connected, ConnectionState::Unstable, ConnectionState::Failed]
    );

    let notification = notifications.try_recv().expect("failure should be surfaced");
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.title, "Balance Update Failed");

    runtime.shutdown().await;
}

#[tokio::test]
async fn test_switch_endpoint_moves_next_refresh() {
    let mut first = RpcMockBuilder::new().await;
    first.mock_get_balance(1_000_000_000, 0);
    let mut second = RpcMockBuilder::new().await;
    second.mock_get_balance(3_000_000_000, 1);

    let runtime = http_runtime(fast_retry_config(vec![first.url(), second.url()]));
    let refresher = runtime.refresher();

    refresher.switch_endpoint(Network::Devnet);
    refresher.refresh_balance(ACCOUNT, Network::Devnet, true).await;

    let snapshot = refresher.snapshot();
    assert_eq!(snapshot.wallet_balance, Some(3.0));
    assert_eq!(snapshot.endpoint.as_deref(), Some(second.url().as_str()));

    first.assert_all().await;
    second.assert_all().await;
    runtime.shutdown().await;
}
