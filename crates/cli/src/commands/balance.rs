use launchpad_core::{
    balance::BalanceRefresher,
    config::AppConfig,
    runtime::LaunchpadRuntime,
    types::{BalanceSnapshot, Network, Notification, NotificationLevel},
};
use std::{future::Future, time::Duration};
use tokio::{signal, sync::broadcast, time};
use tracing::{info, warn};

use super::utils::{print_error, print_info, CliError, CliResult};

/// Options for a one-shot balance lookup.
pub struct BalanceOptions {
    pub account: String,
    pub network: Network,
    pub force: bool,
    pub json: bool,
}

pub async fn fetch_balance(config: AppConfig, options: BalanceOptions) -> CliResult<()> {
    let runtime = LaunchpadRuntime::builder().with_config(config).disable_sweeper().build()?;
    let refresher = runtime.refresher();
    let mut notifications = refresher.subscribe_notifications();

    refresher.refresh_balance(&options.account, options.network, options.force).await;
    let snapshot = refresher.snapshot();
    drain_notifications(&mut notifications);

    runtime.shutdown().await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&options.account, options.network, &snapshot);
    }

    if snapshot.wallet_balance.is_none() {
        return Err(CliError::Unavailable(format!(
            "no endpoint answered for {} (state: {})",
            options.network, snapshot.connection_state
        )));
    }
    Ok(())
}

/// Options for the periodic refresh loop.
pub struct WatchOptions {
    pub account: String,
    pub network: Network,
    pub interval: Duration,
}

pub async fn watch_balance(config: AppConfig, options: WatchOptions) -> CliResult<()> {
    if options.interval.is_zero() {
        return Err(CliError::Config("watch interval must be greater than 0".to_string()));
    }

    let runtime = LaunchpadRuntime::builder().with_config(config).build()?;
    watch_until(runtime.refresher(), &options, ctrl_c()).await;
    runtime.shutdown().await;
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

/// Refreshes on every tick until `shutdown` resolves, including mid-refresh.
async fn watch_until<F>(refresher: &BalanceRefresher, options: &WatchOptions, shutdown: F)
where
    F: Future<Output = ()>,
{
    let mut notifications = refresher.subscribe_notifications();
    let mut ticker = time::interval(options.interval);
    tokio::pin!(shutdown);

    print_info(&format!(
        "Watching {} on {} every {}s (Ctrl+C to stop)",
        options.account,
        options.network,
        options.interval.as_secs()
    ));

    let mut last_printed: Option<BalanceSnapshot> = None;
    loop {
        tokio::select! {
            () = &mut shutdown => break,

            _ = ticker.tick() => {
                tokio::select! {
                    () = &mut shutdown => break,
                    () = refresher.refresh_balance(&options.account, options.network, false) => {}
                }

                let snapshot = refresher.snapshot();
                if last_printed.as_ref() != Some(&snapshot) {
                    print_snapshot(&options.account, options.network, &snapshot);
                    last_printed = Some(snapshot);
                }
                drain_notifications(&mut notifications);
            }
        }
    }
    info!("stopping balance watch");
}

fn print_snapshot(account: &str, network: Network, snapshot: &BalanceSnapshot) {
    let balance = snapshot
        .wallet_balance
        .map_or_else(|| "unknown".to_string(), |balance| format!("{balance:.9} SOL"));
    println!("{account} ({network}): {balance}");
    println!("  Connection: {}", snapshot.connection_state);
    if let Some(endpoint) = &snapshot.endpoint {
        println!("  Endpoint:   {endpoint}");
    }
}

fn drain_notifications(rx: &mut broadcast::Receiver<Notification>) {
    while let Ok(notification) = rx.try_recv() {
        let line = format!("{}: {}", notification.title, notification.message);
        match notification.level {
            NotificationLevel::Error => print_error(&line),
            NotificationLevel::Info => print_info(&line),
        }
    }
}
