//! Daily sweep deleting unverified accounts past their retention window.

use sqlx::PgPool;
use time::{Duration as TimeDuration, OffsetDateTime};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::auth::repo_types::User;
use crate::state::AppState;

/// Unverified accounts are kept this long, measured from creation.
const RETENTION: TimeDuration = TimeDuration::hours(48);

const SWEEP_PERIOD: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

fn reap_cutoff(now: OffsetDateTime) -> OffsetDateTime {
    now - RETENTION
}

/// One sweep: compute the cutoff and delete everything unverified and older.
/// Idempotent; a user created after the cutoff computation is never touched
/// by this run.
pub async fn run_once(db: &PgPool) -> anyhow::Result<u64> {
    let cutoff = reap_cutoff(OffsetDateTime::now_utc());
    User::delete_unverified_older_than(db, cutoff).await
}

/// Spawn the reaper on its own timer, disjoint from request handling. Store
/// errors are logged and the loop keeps going.
pub fn spawn(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_PERIOD);
        loop {
            ticker.tick().await;
            match run_once(&state.db).await {
                Ok(deleted) => info!(deleted, "reaped unverified users"),
                Err(e) => error!(error = ?e, "reaper sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_spares_accounts_younger_than_the_window() {
        let now = OffsetDateTime::now_utc();
        let cutoff = reap_cutoff(now);
        let created_47h_ago = now - TimeDuration::hours(47);
        assert!(created_47h_ago >= cutoff, "47h-old account must survive");
    }

    #[test]
    fn cutoff_catches_accounts_older_than_the_window() {
        let now = OffsetDateTime::now_utc();
        let cutoff = reap_cutoff(now);
        let created_49h_ago = now - TimeDuration::hours(49);
        assert!(created_49h_ago < cutoff, "49h-old account must be reaped");
    }
}
