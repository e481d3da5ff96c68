use clap::Subcommand;
use launchpad_core::{config::AppConfig, types::Network};

use super::utils::{print_info, print_success, CliError, CliResult};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate the effective configuration (file plus environment overrides)
    Validate,

    /// Show the effective configuration
    Show {
        /// Print as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

pub fn handle_config_command(
    command: ConfigCommands,
    config: &AppConfig,
    source: &str,
) -> CliResult<()> {
    match command {
        ConfigCommands::Validate => validate_config(config, source),
        ConfigCommands::Show { json } => show_config(config, source, json),
    }
}

fn validate_config(config: &AppConfig, source: &str) -> CliResult<()> {
    print_info(&format!("Validating configuration from {source}..."));
    config.validate().map_err(CliError::Config)?;

    print_success("Configuration is valid!");
    println!("Configuration Summary:");
    for network in Network::ALL {
        println!("  {network}: {} endpoints", config.endpoints.for_network(network).len());
    }
    println!(
        "  Retry: {} attempts, {}ms..{}ms backoff",
        config.retry.max_attempts, config.retry.base_delay_ms, config.retry.max_delay_ms
    );
    println!("  Cache max age: {}ms", config.balance.cache_max_age_ms);

    Ok(())
}

fn show_config(config: &AppConfig, source: &str, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("Configuration from {source}:");

    println!("\n[Endpoints]");
    for network in Network::ALL {
        println!("  {network}:");
        for endpoint in config.endpoints.for_network(network) {
            println!("    {endpoint}");
        }
    }

    println!("\n[Balance]");
    println!("  Cache Max Age: {}ms", config.balance.cache_max_age_ms);
    println!("  Debounce: {}ms", config.balance.debounce_ms);
    println!("  Lamport Threshold: {}", config.balance.lamport_threshold);

    println!("\n[Retry]");
    println!("  Max Attempts: {}", config.retry.max_attempts);
    println!("  Base Delay: {}ms", config.retry.base_delay_ms);
    println!("  Max Delay: {}ms", config.retry.max_delay_ms);
    println!("  Multiplier: {}", config.retry.backoff_multiplier);
    println!("  Attempt Timeout: {}ms", config.retry.attempt_timeout_ms);

    println!("\n[Blacklist]");
    println!("  Rate Limit Cooldown: {}ms", config.blacklist.rate_limit_cooldown_ms);
    println!("  Connection Cooldown: {}ms", config.blacklist.connection_cooldown_ms);
    println!("  Sweep Interval: {}s", config.blacklist.sweep_interval_seconds);

    println!("\n[Auth]");
    println!("  Domain: {}", config.auth.domain);
    println!("  Challenge TTL: {}s", config.auth.challenge_ttl_seconds);
    println!("  Session TTL: {}s", config.auth.session_ttl_seconds);

    println!("\n[Logging]");
    println!("  Level: {}", config.logging.level);
    println!("  Format: {}", config.logging.format);

    Ok(())
}
