pub mod balance;
pub mod config;
pub mod endpoints;
pub mod utils;

pub use balance::{fetch_balance, watch_balance, BalanceOptions, WatchOptions};
pub use config::{handle_config_command, ConfigCommands};
pub use endpoints::list_endpoints;
