use std::sync::Arc;
use std::time::Duration;

use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};
use tokio::task::JoinHandle;

use dermscore_service::aggregate;
use dermscore_storage::DocumentStore;

/// The first `00:00 UTC + offset` strictly after `now`.
pub fn next_run(now: Timestamp, offset: SignedDuration) -> Result<Timestamp, jiff::Error> {
    let today = now.to_zoned(TimeZone::UTC).date();
    let candidate = today.to_zoned(TimeZone::UTC)?.timestamp().checked_add(offset)?;
    if candidate > now {
        return Ok(candidate);
    }
    today
        .tomorrow()?
        .to_zoned(TimeZone::UTC)?
        .timestamp()
        .checked_add(offset)
}

/// Run the nightly aggregation forever on a daily schedule.
///
/// A failed run is logged and the loop waits for the next day.
pub fn spawn(store: Arc<dyn DocumentStore>, offset: SignedDuration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let now = Timestamp::now();
            let at = match next_run(now, offset) {
                Ok(at) => at,
                Err(e) => {
                    tracing::error!(error = %e, "cannot compute next aggregation time");
                    return;
                }
            };
            tracing::info!(next_run = %at, "aggregation scheduled");

            let wait = Duration::try_from(now.duration_until(at)).unwrap_or(Duration::ZERO);
            tokio::time::sleep(wait).await;

            if let Err(e) = aggregate::run_nightly(store.as_ref(), Timestamp::now()).await {
                tracing::warn!(error = %e, "nightly aggregation failed");
            }
        }
    })
}
