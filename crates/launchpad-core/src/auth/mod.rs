//! Wallet sign-in.
//!
//! # Flow
//!
//! ```text
//! issue_challenge(wallet) ──> Challenge { nonce, message }
//!                                  │
//!                     wallet signs message (ed25519)
//!                                  │
//! verify_and_create(wallet, nonce, signature)
//!   ├─ nonce consumed (single use)
//!   ├─ issued to this wallet, not expired
//!   └─ signature verifies ──> Session { id, expires_at }
//! ```
//!
//! Sessions and challenges live in memory only and expire lazily. The runtime's
//! background sweeper reclaims expired entries.

pub mod session;

pub use session::{Challenge, Session, SessionStore};

use thiserror::Error;

/// Errors raised during wallet sign-in.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Wallet address is not a valid ed25519 public key")]
    InvalidWallet,

    #[error("Signature is malformed or does not match the challenge")]
    InvalidSignature,

    #[error("Unknown or already used challenge")]
    UnknownChallenge,

    #[error("Challenge expired")]
    ChallengeExpired,

    #[error("Challenge was issued to a different wallet")]
    WalletMismatch,
}
