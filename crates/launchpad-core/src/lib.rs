//! # Launchpad Core
//!
//! RPC reliability layer for the token launchpad.
//!
//! This crate provides the components a wallet session needs to read balances from
//! flaky public RPC endpoints:
//!
//! - **[`upstream`]**: Endpoint selection with per-network cooldowns, typed failure
//!   classification, capped exponential backoff and the HTTP `getBalance` transport.
//!
//! - **[`cache`]**: Short-lived balance cache keyed by account and network.
//!
//! - **[`balance`]**: The refresh driver that ties the above together and derives a
//!   coarse connection state for the UI.
//!
//! - **[`auth`]**: Wallet sign-in with single-use signed challenges and in-memory sessions.
//!
//! - **[`runtime`]**: Builder and lifecycle for the whole set, including the periodic
//!   sweeper.
//!
//! ## Refresh Flow
//!
//! ```text
//! refresh_balance(account, network, force)
//!       │
//!       ▼
//! ┌─────────────┐
//! │ Cache Check │ ─── Fresh ──► publish cached balance (Connected)
//! └──────┬──────┘
//!        │ Miss / forced
//!        ▼
//! ┌─────────────┐
//! │  Debounce   │ ─── Too soon ──► skip
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌──────────────────┐       ┌───────────┐
//! │ EndpointSelector │ ◄──── │ Blacklist │ ◄── cooldown on rate limit / connection
//! └────────┬─────────┘       └───────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ getBalance with │ ─── Err ──► classify, backoff, retry
//! │   timeout       │
//! └────────┬────────┘
//!          │ Ok
//!          ▼
//! ┌─────────────────┐
//! │  Cache Insert   │ ──► snapshot (balance, Connected)
//! └─────────────────┘
//! ```

pub mod auth;
pub mod balance;
pub mod cache;
pub mod config;
pub mod runtime;
pub mod types;
pub mod upstream;
