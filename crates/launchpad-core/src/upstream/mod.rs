//! RPC endpoint handling for balance lookups.
//!
//! This module covers everything between the refresh driver and the network:
//! - [`EndpointSelector`]: picks the next usable endpoint from an ordered list
//! - [`Blacklist`]: per-network cooldowns for endpoints that misbehaved
//! - [`BackoffPolicy`]: capped exponential delay between attempts
//! - [`BalanceTransport`]: the call seam, with [`HttpBalanceTransport`] over [`HttpClient`]
//! - [`UpstreamError`] and [`FailureKind`]: typed failures and their classification
//!
//! # Failure Handling
//!
//! ```text
//! attempt → Ok ──────────────────────────────→ done
//!         → Err(e) → e.failure_kind()
//!                      ├─ RateLimit           → blacklist 60s, reselect
//!                      ├─ Connection/Timeout  → blacklist 30s, reselect
//!                      └─ Unclassified        → same endpoint
//! ```

pub mod backoff;
pub mod blacklist;
pub mod errors;
pub mod http_client;
pub mod selector;
pub mod transport;

pub use backoff::BackoffPolicy;
pub use blacklist::Blacklist;
pub use errors::{FailureKind, UpstreamError};
pub use http_client::{HttpClient, HttpClientConfig};
pub use selector::EndpointSelector;
pub use transport::{BalanceTransport, HttpBalanceTransport};
