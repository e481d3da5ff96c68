//! Mock Infrastructure for Testing the Launchpad Reliability Layer
//!
//! Reusable mock endpoints and fixtures so integration tests run without real network
//! connections.
//!
//! ## Components
//!
//! - `RpcMockBuilder`: Wraps mockito to serve `getBalance` successes and failures
//! - Test helpers for configuration and runtime setup
//!
//! ## Usage
//!
//! ```ignore
//! use tests::mock_infrastructure::{fast_retry_config, http_runtime, RpcMockBuilder};
//!
//! let mut mock = RpcMockBuilder::new().await;
//! mock.mock_get_balance(5_000_000_000, 1);
//!
//! let runtime = http_runtime(fast_retry_config(vec![mock.url()]));
//! ```

pub mod rpc_mock;
pub mod test_helpers;

pub use rpc_mock::RpcMockBuilder;
pub use test_helpers::*;
