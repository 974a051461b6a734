use std::time::Duration;
use thiserror::Error;
use tokio::{time, time::MissedTickBehavior};
use tracing::{info, warn};
use duckdns::Client;

/// Polls the first domain's TXT record until it reads `expected`.
///
/// Lookup failures are logged and polling carries on; DNS answers for a
/// freshly changed record are often NXDOMAIN or empty for a while.
#[tracing::instrument(skip(client))]
pub async fn wait_for_record(
    client: &Client,
    expected: &str,
    interval: Duration,
    timeout: Duration,
) -> Result<(), WaitError> {
    let poll = async {
        let mut interval = time::interval(interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            match client.get_record().await {
                Ok(value) if value == expected => return,
                Ok(value) => info!(current = %value, "record not propagated yet"),
                Err(e) if e.is_not_found() => info!("record not found yet"),
                Err(e) => warn!("record lookup failed: {}", e),
            }
        }
    };

    time::timeout(timeout, poll)
        .await
        .map_err(|_| WaitError::TimedOut(timeout))
}

#[derive(Debug, Error)]
pub enum WaitError {
    #[error("record did not propagate within {0:?}")]
    TimedOut(Duration),
}
