//! Background refresh loop.
//!
//! Polls the run API right away and then once per interval, forwarding
//! each outcome to the app as an [`AppMessage`]. Polls never overlap: a slow
//! poll delays the next one instead of stacking up behind it.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::api::RunApiClient;
use crate::app::AppMessage;

/// Fetch one snapshot and turn the outcome into a message.
pub async fn poll_once(client: &RunApiClient, narrative_limit: usize) -> AppMessage {
    match client.fetch_snapshot(narrative_limit).await {
        Ok(snapshot) => AppMessage::SnapshotLoaded(Box::new(snapshot)),
        Err(e) => {
            warn!("Refresh from {} failed: {}", client.base_url, e);
            AppMessage::RefreshFailed {
                error: e.user_message(),
                retryable: e.is_retryable(),
            }
        }
    }
}

/// Spawn the poll loop. It stops once `tx`'s receiver is dropped.
///
/// `interval` must be non-zero.
pub fn spawn_poller(
    client: RunApiClient,
    interval: Duration,
    narrative_limit: usize,
    tx: mpsc::UnboundedSender<AppMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // First tick completes immediately
            ticker.tick().await;

            let msg = poll_once(&client, narrative_limit).await;
            if tx.send(msg).is_err() {
                debug!("App receiver dropped, stopping poller");
                break;
            }
        }
    })
}
