//! Core type definitions shared across the reliability layer.
//!
//! # Type Categories
//!
//! ## Network and Units
//! - [`Network`]: the cluster an endpoint, cache entry or blacklist entry belongs to
//! - [`LAMPORTS_PER_SOL`] and [`lamports_to_sol`]: native-unit conversion
//!
//! ## JSON-RPC Protocol Types
//! - [`JsonRpcRequest`], [`JsonRpcResponse`], [`JsonRpcError`]: wire shapes for the
//!   `getBalance` call issued by the HTTP transport
//!
//! ## Observable State
//! - [`ConnectionState`], [`BalanceSnapshot`], [`Notification`]: what the UI layer consumes

use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr, sync::Arc};

/// JSON-RPC protocol version constant to avoid repeated allocations.
pub const JSONRPC_VERSION: &str = "2.0";

const JSONRPC_VERSION_COW: Cow<'static, str> = Cow::Borrowed(JSONRPC_VERSION);

/// Number of lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Converts a lamport amount into whole SOL.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Cluster a request is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Devnet,
    MainnetBeta,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Devnet, Network::MainnetBeta];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devnet => "devnet",
            Self::MainnetBeta => "mainnet-beta",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Self::Devnet),
            "mainnet-beta" | "mainnet_beta" | "mainnet" => Ok(Self::MainnetBeta),
            other => Err(format!("unknown network '{other}', expected devnet or mainnet-beta")),
        }
    }
}

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: Cow<'static, str>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    pub id: Arc<serde_json::Value>,
}

impl JsonRpcRequest {
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        params: Option<serde_json::Value>,
        id: serde_json::Value,
    ) -> Self {
        Self { jsonrpc: JSONRPC_VERSION_COW, method: method.into(), params, id: Arc::new(id) }
    }
}

/// JSON-RPC 2.0 response structure.
///
/// Contains either a `result` or an `error`, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: Cow<'static, str>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: Arc<serde_json::Value>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Coarse health signal derived from consecutive refresh failures.
///
/// Transitions:
/// - `Connected` -> `Unstable`: two consecutive exhausted refreshes
/// - `Unstable` -> `Failed`: three or more consecutive exhausted refreshes
/// - any state -> `Connected`: a successful refresh, or an explicit endpoint switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Connected,
    Unstable,
    Failed,
}

impl ConnectionState {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Unstable => "unstable",
            Self::Failed => "failed",
        }
    }

    /// Derives the state for a given count of consecutive exhausted refreshes.
    ///
    /// A single failure does not degrade the state on its own.
    #[must_use]
    pub fn for_consecutive_failures(failures: u32, current: Self) -> Self {
        match failures {
            0 => Self::Connected,
            1 => current,
            2 => Self::Unstable,
            _ => Self::Failed,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output fields observed by the UI layer after each refresh.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BalanceSnapshot {
    /// Account the balance belongs to.
    pub account: Option<String>,
    pub network: Option<Network>,
    /// Last known balance in whole SOL, `None` until the first successful fetch.
    pub wallet_balance: Option<f64>,
    pub is_loading_balance: bool,
    pub connection_state: ConnectionState,
    /// Endpoint that served the last successful fetch.
    pub endpoint: Option<String>,
}

impl BalanceSnapshot {
    /// Points the snapshot at `(account, network)`, dropping a balance that belongs to
    /// a different account or network.
    pub fn retarget(&mut self, account: &str, network: Network) {
        if self.account.as_deref() != Some(account) || self.network != Some(network) {
            self.account = Some(account.to_string());
            self.network = Some(network);
            self.wallet_balance = None;
            self.endpoint = None;
        }
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// User-visible notification emitted by the refresh driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}
