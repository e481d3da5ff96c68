//! Periodic maintenance for session-scoped state.
//!
//! The sweeper runs until the runtime's shutdown broadcast fires. Each tick it:
//! - clears the endpoint blacklist for every network, so no endpoint stays benched
//!   longer than one interval even if its cooldown was misconfigured
//! - drops expired sign-in challenges and sessions

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, trace};

use crate::{auth::SessionStore, upstream::Blacklist};

/// Runs the maintenance loop. The first sweep happens one `interval` after start.
pub async fn run_sweeper(
    blacklist: Arc<Blacklist>,
    sessions: Arc<SessionStore>,
    interval: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = shutdown_rx.recv() => {
                debug!("sweeper received shutdown signal");
                break;
            }

            _ = ticker.tick() => {
                blacklist.clear_all();
                let swept = sessions.sweep_expired();
                trace!(swept_auth_entries = swept, "sweep complete");
            }
        }
    }
}
