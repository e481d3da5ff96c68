//! Integration Tests for the Launchpad RPC Reliability Layer
//!
//! This crate contains various test modules:
//!
//! - `failover_tests`: Endpoint rotation and cooldowns driven by real HTTP failures
//! - `refresh_tests`: Cache freshness, debounce and snapshot publication
//! - `session_tests`: Wallet sign-in through the runtime's session store
//! - `runtime_tests`: Builder validation, custom transports, sweeper and shutdown
//! - `config_tests`: Layered file and environment configuration
//! - `mock_infrastructure`: Reusable mock RPC endpoints and fixtures
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --package tests
//! ```
//!
//! No external services are required; every endpoint is a local mockito server.

#[cfg(test)]
mod failover_tests;

#[cfg(test)]
mod refresh_tests;

#[cfg(test)]
mod session_tests;


#[cfg(test)]
mod config_tests;

/// Mock infrastructure for testing
pub mod mock_infrastructure;
