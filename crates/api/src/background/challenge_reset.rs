//! Periodic cleanup of stale daily challenges.
//!
//! A challenge left incomplete past its day is deleted so the next
//! `GET /api/challenges/daily` generates a fresh one. Runs on a fixed
//! interval using `tokio::time::interval`; each tick is equivalent to the
//! midnight reset, just evaluated more often so restarts cannot skip it.

use std::time::Duration;

use chrono::Utc;
use devquest_core::streak::day_start;
use devquest_db::repositories::challenge_repo::ChallengeRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the stale-challenge sweep loop.
///
/// Deletes incomplete challenges created before the current UTC day.
/// Runs until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Challenge reset job started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Challenge reset job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = day_start(Utc::now());
                match ChallengeRepo::delete_stale_pending(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Challenge reset: purged stale challenges");
                        } else {
                            tracing::debug!("Challenge reset: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Challenge reset: sweep failed");
                    }
                }
            }
        }
    }
}
