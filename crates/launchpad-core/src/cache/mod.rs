//! Balance caching.
//!
//! [`BalanceCache`] keeps the last-known balance per `(account, network)` so repeated
//! refreshes inside the freshness window are served without a network call. Entries are
//! never evicted on read; they are overwritten by the next successful fetch.

pub mod balance_cache;

pub use balance_cache::BalanceCache;
