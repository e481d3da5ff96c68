//! Balance refresh with retries, endpoint rotation and connection-state tracking.

pub mod refresher;

pub use refresher::{BalanceRefresher, RefresherConfig};
