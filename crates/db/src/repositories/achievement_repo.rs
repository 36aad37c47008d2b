//! Repository for the `achievements` table.

use devquest_core::types::DbId;
use sqlx::PgPool;

use crate::models::achievement::Achievement;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, criterion, name, description, icon, unlocked_at";

/// Provides read and unlock operations for achievements.
///
/// The progression engine's achievement checker is the only writer.
pub struct AchievementRepo;

impl AchievementRepo {
    /// List all achievements for a user, most recently unlocked first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements WHERE user_id = $1 ORDER BY unlocked_at DESC"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The criterion keys already unlocked by a user.
    pub async fn criteria_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT criterion FROM achievements WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert an achievement record if it does not already exist.
    ///
    /// Idempotent via `ON CONFLICT DO NOTHING` on the
    /// `uq_achievements_user_criterion` constraint: returns `Some` with the
    /// created row only when this call actually inserted it, `None` when a
    /// concurrent check got there first. "Already exists" is success, not an
    /// error.
    pub async fn unlock(
        pool: &PgPool,
        user_id: DbId,
        criterion: &str,
        name: &str,
        description: &str,
        icon: &str,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements (user_id, criterion, name, description, icon)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_achievements_user_criterion DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .bind(criterion)
            .bind(name)
            .bind(description)
            .bind(icon)
            .fetch_optional(pool)
            .await
    }
}
