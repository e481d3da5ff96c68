use launchpad_core::{config::AppConfig, types::Network};

use super::utils::{CliError, CliResult};

/// Prints the configured endpoint rotation for one or all networks.
pub fn list_endpoints(config: &AppConfig, network: Option<Network>) -> CliResult<()> {
    let networks = network.map_or_else(|| Network::ALL.to_vec(), |network| vec![network]);

    for network in networks {
        let endpoints = config.endpoints.for_network(network);
        if endpoints.is_empty() {
            return Err(CliError::Config(format!("No RPC endpoints configured for {network}")));
        }

        println!("[{network}] ({} endpoints, tried in order)", endpoints.len());
        for (index, endpoint) in endpoints.iter().enumerate() {
            println!("  {index}: {endpoint}");
        }
    }

    println!(
        "\nCooldowns: rate limit {}ms, connection {}ms, full reset every {}s",
        config.blacklist.rate_limit_cooldown_ms,
        config.blacklist.connection_cooldown_ms,
        config.blacklist.sweep_interval_seconds
    );
    Ok(())
}
