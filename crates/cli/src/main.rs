use anyhow::Context;
use clap::{Parser, Subcommand};
use launchpad_core::{config::AppConfig, types::Network};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
use commands::{
    fetch_balance, handle_config_command, list_endpoints, watch_balance, BalanceOptions,
    ConfigCommands, WatchOptions,
};

#[derive(Parser)]
#[command(name = "launchpad-cli")]
#[command(about = "Launchpad CLI - balance checks and endpoint tooling for the RPC reliability layer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the TOML config file
    #[arg(short, long, global = true, env = "LAUNCHPAD_CONFIG", default_value = "config/config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a wallet balance once, with endpoint rotation and retries
    Balance {
        /// Account public key (base58)
        account: String,

        /// Network to query (devnet, mainnet-beta)
        #[arg(short, long, default_value = "devnet")]
        network: Network,

        /// Bypass the cache and debounce window
        #[arg(long)]
        force: bool,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Refresh a wallet balance periodically until interrupted
    Watch {
        /// Account public key (base58)
        account: String,

        /// Network to query (devnet, mainnet-beta)
        #[arg(short, long, default_value = "devnet")]
        network: Network,

        /// Seconds between refreshes
        #[arg(short, long, default_value = "5")]
        interval: u64,
    },

    /// List configured RPC endpoints
    Endpoints {
        /// Only show this network
        #[arg(short, long)]
        network: Option<Network>,
    },

    /// Configuration Management
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Installs the global tracing subscriber. Logs go to stderr so command output stays
/// machine-readable.
fn init_logging(config: &AppConfig) {
    let default_directives =
        format!("warn,launchpad_core={0},cli={0}", config.logging.level.to_lowercase());
    let filter = match std::env::var("RUST_LOG") {
        Ok(env_filter) if env_filter == "debug" || env_filter == "trace" => {
            EnvFilter::new(format!("warn,launchpad_core={env_filter},cli={env_filter}"))
        }
        Ok(_) => EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| EnvFilter::new(&default_directives)),
        Err(_) => EnvFilter::new(&default_directives),
    };

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format.as_str() == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr);
        registry.with(fmt_layer).init();
    } else {
        // "pretty" and any other format default to pretty logging
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_writer(std::io::stderr);
        registry.with(fmt_layer).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;
    init_logging(&config);

    match cli.command {
        Commands::Balance { account, network, force, json } => {
            fetch_balance(config, BalanceOptions { account, network, force, json }).await?;
        }

        Commands::Watch { account, network, interval } => {
            let options =
                WatchOptions { account, network, interval: Duration::from_secs(interval) };
            watch_balance(config, options).await?;
        }

        Commands::Endpoints { network } => {
            list_endpoints(&config, network)?;
        }

        Commands::Config(config_command) => {
            handle_config_command(config_command, &config, &cli.config)?;
        }
    }

    Ok(())
}
