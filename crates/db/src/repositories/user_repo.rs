//! Repository for the `users` table.

use devquest_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::user::{CreateUser, LeaderboardEntry, ProgressionUpdate, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, username, email, password_hash, avatar, bio, \
                        tech_stack, learning_goals, xp, coins, streak, tasks_completed, \
                        total_hours_coded, last_completion_at, created_at";

/// Provides CRUD and progression operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, username, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                username = COALESCE($3, username),
                email = COALESCE($4, email),
                bio = COALESCE($5, bio),
                tech_stack = COALESCE($6, tech_stack),
                learning_goals = COALESCE($7, learning_goals)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.bio)
            .bind(&input.tech_stack)
            .bind(&input.learning_goals)
            .fetch_optional(pool)
            .await
    }

    /// Load a user inside a transaction with a `FOR UPDATE` row lock.
    ///
    /// This is the per-user serialization point for the progression engine:
    /// a second completion for the same user blocks here until the first
    /// transaction commits or rolls back.
    pub async fn lock_for_progression(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Write back the progression fields after a rewarded completion.
    ///
    /// Must run on the same transaction that holds the row lock from
    /// [`lock_for_progression`](Self::lock_for_progression).
    pub async fn apply_progression(
        conn: &mut PgConnection,
        id: DbId,
        update: &ProgressionUpdate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                xp = $2,
                coins = $3,
                streak = $4,
                tasks_completed = $5,
                total_hours_coded = $6,
                last_completion_at = $7
             WHERE id = $1",
        )
        .bind(id)
        .bind(update.xp)
        .bind(update.coins)
        .bind(update.streak)
        .bind(update.tasks_completed)
        .bind(update.total_hours_coded)
        .bind(update.last_completion_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Top `limit` users ordered by XP descending.
    pub async fn leaderboard(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT id, name, avatar, xp, streak, tasks_completed, total_hours_coded
             FROM users
             ORDER BY xp DESC, id ASC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// 1-based leaderboard rank for a user with the given XP: one more than
    /// the number of users with strictly more XP.
    pub async fn rank_for_xp(pool: &PgPool, xp: i32) -> Result<i64, sqlx::Error> {
        let above: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE xp > $1")
            .bind(xp)
            .fetch_one(pool)
            .await?;
        Ok(above + 1)
    }
}
