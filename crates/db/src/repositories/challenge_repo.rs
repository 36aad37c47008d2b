//! Repository for the `challenges` table.

use devquest_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::challenge::{Challenge, CreateChallenge};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, title, description, xp_bonus, kind, completed, completed_at, created_at";

/// Provides CRUD operations for challenges.
pub struct ChallengeRepo;

impl ChallengeRepo {
    /// Insert a new open challenge for a user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateChallenge,
    ) -> Result<Challenge, sqlx::Error> {
        let query = format!(
            "INSERT INTO challenges (user_id, title, description, xp_bonus, kind)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Challenge>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.xp_bonus)
            .bind(&input.kind)
            .fetch_one(pool)
            .await
    }

    /// Find a challenge by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM challenges WHERE id = $1");
        sqlx::query_as::<_, Challenge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the user's open (not yet completed) challenge created at or
    /// after `since`, i.e. today's daily challenge when `since` is the UTC
    /// day start.
    pub async fn find_open_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM challenges
             WHERE user_id = $1 AND completed = false AND created_at >= $2
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Challenge>(&query)
            .bind(user_id)
            .bind(since)
            .fetch_optional(pool)
            .await
    }

    /// Transition an open challenge to completed.
    ///
    /// Runs on the progression transaction. `None` means the challenge was
    /// already completed (at-most-once transition, same pattern as tasks).
    pub async fn mark_completed(
        conn: &mut PgConnection,
        id: DbId,
        completed_at: Timestamp,
    ) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!(
            "UPDATE challenges SET completed = true, completed_at = $2
             WHERE id = $1 AND completed = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Challenge>(&query)
            .bind(id)
            .bind(completed_at)
            .fetch_optional(conn)
            .await
    }

    /// Delete challenges that are still open and were created before
    /// `cutoff`. Used by the daily reset sweep; returns the number of rows
    /// removed.
    ///
    /// Only touches not-yet-completed rows, so running concurrently with
    /// live completion requests is safe: a challenge completed mid-sweep is
    /// no longer matched by the predicate.
    pub async fn delete_stale_pending(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM challenges WHERE completed = false AND created_at < $1")
                .bind(cutoff)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
