use chrono::{DateTime, Utc};
use dashmap::DashMap;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{auth::SessionError, config::AuthConfig};

/// Sign-in challenge handed to a wallet.
#[derive(Debug, Clone, Serialize)]
pub struct Challenge {
    pub nonce: String,
    /// Exact text the wallet must sign.
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// Authenticated wallet session.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub wallet: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip)]
    deadline: Instant,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

#[derive(Debug)]
struct PendingChallenge {
    wallet: String,
    message: String,
    deadline: Instant,
}

/// In-memory wallet sign-in store.
///
/// A wallet proves ownership by signing the message from [`issue_challenge`]; a
/// valid signature is exchanged for a [`Session`]. Challenges are single-use and
/// both challenges and sessions expire lazily, with [`sweep_expired`] reclaiming
/// memory.
///
/// [`issue_challenge`]: SessionStore::issue_challenge
/// [`sweep_expired`]: SessionStore::sweep_expired
pub struct SessionStore {
    domain: String,
    challenge_ttl: Duration,
    session_ttl: Duration,
    challenges: DashMap<String, PendingChallenge>,
    sessions: DashMap<Uuid, Session>,
}

impl SessionStore {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            domain: config.domain.clone(),
            challenge_ttl: Duration::from_secs(config.challenge_ttl_seconds),
            session_ttl: Duration::from_secs(config.session_ttl_seconds),
            challenges: DashMap::new(),
            sessions: DashMap::new(),
        }
    }

    /// Issues a fresh challenge for `wallet`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidWallet`] if `wallet` is not a base58 ed25519 public key.
    pub fn issue_challenge(&self, wallet: &str) -> Result<Challenge, SessionError> {
        parse_wallet(wallet)?;

        let nonce = Uuid::new_v4().simple().to_string();
        let issued_at = Utc::now();
        let message = format!(
            "{} wants you to sign in with your Solana account:\n{wallet}\n\nNonce: {nonce}\nIssued At: {}",
            self.domain,
            issued_at.to_rfc3339(),
        );

        self.challenges.insert(
            nonce.clone(),
            PendingChallenge {
                wallet: wallet.to_string(),
                message: message.clone(),
                deadline: Instant::now() + self.challenge_ttl,
            },
        );
        debug!(wallet = wallet, "issued sign-in challenge");

        Ok(Challenge { nonce, message, expires_at: wall_clock_after(issued_at, self.challenge_ttl) })
    }

    /// Verifies a signed challenge and opens a session.
    ///
    /// The challenge is consumed whether or not verification succeeds.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidWallet`] if `wallet` is not a valid public key
    /// - [`SessionError::UnknownChallenge`] if the nonce was never issued or already used
    /// - [`SessionError::WalletMismatch`] if the nonce was issued to another wallet
    /// - [`SessionError::ChallengeExpired`] if the challenge outlived its TTL
    /// - [`SessionError::InvalidSignature`] if the signature is malformed or does not verify
    pub fn verify_and_create(
        &self,
        wallet: &str,
        nonce: &str,
        signature_b58: &str,
    ) -> Result<Session, SessionError> {
        let verifying_key = parse_wallet(wallet)?;

        let (_, challenge) =
            self.challenges.remove(nonce).ok_or(SessionError::UnknownChallenge)?;
        if challenge.wallet != wallet {
            return Err(SessionError::WalletMismatch);
        }
        if Instant::now() >= challenge.deadline {
            return Err(SessionError::ChallengeExpired);
        }

        let signature_bytes: [u8; 64] = bs58::decode(signature_b58)
            .into_vec()
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(SessionError::InvalidSignature)?;
        let signature = Signature::from_bytes(&signature_bytes);
        verifying_key
            .verify(challenge.message.as_bytes(), &signature)
            .map_err(|_| SessionError::InvalidSignature)?;

        let created_at = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            wallet: wallet.to_string(),
            created_at,
            expires_at: wall_clock_after(created_at, self.session_ttl),
            deadline: Instant::now() + self.session_ttl,
        };
        self.sessions.insert(session.id, session.clone());
        info!(wallet = wallet, session_id = %session.id, "wallet session created");

        Ok(session)
    }

    /// Returns the session if it exists and has not expired.
    #[must_use]
    pub fn validate(&self, session_id: &Uuid) -> Option<Session> {
        let session = self.sessions.get(session_id)?;
        (!session.is_expired()).then(|| session.clone())
    }

    /// Removes a session. Returns `true` if it existed.
    pub fn revoke(&self, session_id: &Uuid) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            debug!(session_id = %session_id, "session revoked");
        }
        removed
    }

    /// Drops expired challenges and sessions. Returns how many entries were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.challenges.retain(|_, challenge| {
            let live = now < challenge.deadline;
            removed += usize::from(!live);
            live
        });
        self.sessions.retain(|_, session| {
            let live = now < session.deadline;
            removed += usize::from(!live);
            live
        });

        if removed > 0 {
            debug!(removed = removed, "swept expired auth entries");
        }
        removed
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn pending_challenges(&self) -> usize {
        self.challenges.len()
    }
}

fn parse_wallet(wallet: &str) -> Result<VerifyingKey, SessionError> {
    let bytes: [u8; 32] = bs58::decode(wallet)
        .into_vec()
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(SessionError::InvalidWallet)?;
    VerifyingKey::from_bytes(&bytes).map_err(|_| SessionError::InvalidWallet)
}

fn wall_clock_after(start: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| start.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
