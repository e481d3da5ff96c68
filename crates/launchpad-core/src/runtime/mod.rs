//! Launchpad runtime initialization and lifecycle management.
//!
//! Builds one session's worth of reliability state (blacklist, selector, cache,
//! refresher, session store) from an [`AppConfig`](crate::config::AppConfig), starts
//! the background sweeper and coordinates shutdown.
//!
//! # Example
//!
//! ```no_run
//! use launchpad_core::{config::AppConfig, runtime::LaunchpadRuntime, types::Network};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runtime = LaunchpadRuntime::builder().with_config(AppConfig::load()?).build()?;
//!
//!     let refresher = runtime.refresher();
//!     refresher.refresh_balance("Addr1", Network::Devnet, false).await;
//!     println!("{:?}", refresher.snapshot());
//!
//!     runtime.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod background;
pub mod builder;
pub mod components;
pub mod lifecycle;

pub use builder::{LaunchpadRuntimeBuilder, RuntimeError};
pub use components::LaunchpadComponents;
pub use lifecycle::LaunchpadRuntime;
