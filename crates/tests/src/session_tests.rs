//! Wallet sign-in through the runtime's session store.

use ed25519_dalek::{Signer, SigningKey};
use launchpad_core::{
    auth::SessionError,
    config::AppConfig,
    runtime::LaunchpadRuntime,
};
use std::time::Duration;

struct Wallet {
    key: SigningKey,
    address: String,
}

impl Wallet {
    fn from_seed(seed: u8) -> Self {
        let key = SigningKey::from_bytes(&[seed; 32]);
        let address = bs58::encode(key.verifying_key().as_bytes()).into_string();
        Self { key, address }
    }

    fn sign(&self, message: &str) -> String {
        bs58::encode(self.key.sign(message.as_bytes()).to_bytes()).into_string()
    }
}

fn runtime_with_domain(domain: &str) -> LaunchpadRuntime {
    let mut config = AppConfig::default();
    config.auth.domain = domain.to_string();
    config.auth.challenge_ttl_seconds = 60;
    config.auth.session_ttl_seconds = 600;
    LaunchpadRuntime::builder().with_config(config).build().expect("runtime should build")
}

#[tokio::test(start_paused = true)]
async fn test_sign_in_round_trip_uses_configured_domain() {
    let runtime = runtime_with_domain("launch.example");
    let sessions = runtime.sessions();
    let wallet = Wallet::from_seed(11);

    let challenge = sessions.issue_challenge(&wallet.address).unwrap();
    assert!(challenge.message.starts_with("launch.example wants you to sign in"));

    let session = sessions
        .verify_and_create(&wallet.address, &challenge.nonce, &wallet.sign(&challenge.message))
        .unwrap();
    assert_eq!(sessions.validate(&session.id).map(|s| s.wallet), Some(wallet.address.clone()));

    assert!(sessions.revoke(&session.id));
    assert!(sessions.validate(&session.id).is_none());

    runtime.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_signature_over_other_message_is_rejected() {
    let runtime = runtime_with_domain("launch.example");
    let sessions = runtime.sessions();
    let wallet = Wallet::from_seed(11);

    let first = sessions.issue_challenge(&wallet.address).unwrap();
    let second = sessions.issue_challenge(&wallet.address).unwrap();
    assert_ne!(first.nonce, second.nonce);

    let result =
        sessions.verify_and_create(&wallet.address, &second.nonce, &wallet.sign(&first.message));
    assert_eq!(result.unwrap_err(), SessionError::InvalidSignature);

    runtime.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_prunes_expired_sessions() {
    let runtime = runtime_with_domain("launch.example");
    let sessions = runtime.sessions();
    let wallet = Wallet::from_seed(3);

    let challenge = sessions.issue_challenge(&wallet.address).unwrap();
    sessions
        .verify_and_create(&wallet.address, &challenge.nonce, &wallet.sign(&challenge.message))
        .unwrap();
    sessions.issue_challenge(&wallet.address).unwrap();
    assert_eq!(sessions.session_count(), 1);
    assert_eq!(sessions.pending_challenges(), 1);

    // Sessions last 600s; the sweeper runs every 300s.
    tokio::time::sleep(Duration::from_secs(901)).await;

    assert_eq!(sessions.session_count(), 0);
    assert_eq!(sessions.pending_challenges(), 0);

    runtime.shutdown().await;
}
