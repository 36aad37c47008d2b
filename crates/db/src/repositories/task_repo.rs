//! Repository for the `tasks` table.

use devquest_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, difficulty, estimated_minutes, \
                        actual_minutes, status, learned, completed_at, created_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new pending task for a user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (user_id, name, description, difficulty, estimated_minutes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.difficulty)
            .bind(input.estimated_minutes)
            .fetch_one(pool)
            .await
    }

    /// Find a task by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks for a user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a pending task. Only non-`None` fields in `input` are applied.
    ///
    /// The `status = 'pending'` predicate makes completed tasks immutable at
    /// the database level; returns `None` when the row is missing or already
    /// completed.
    pub async fn update_pending(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                difficulty = COALESCE($4, difficulty),
                estimated_minutes = COALESCE($5, estimated_minutes)
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.difficulty)
            .bind(input.estimated_minutes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Transition a pending task to completed, recording the reported time
    /// and the "learned something" flag.
    ///
    /// Runs on the progression transaction. The `status = 'pending'`
    /// predicate guarantees a task completes at most once even under
    /// concurrent requests; `None` means it was already completed.
    pub async fn mark_completed(
        conn: &mut PgConnection,
        id: DbId,
        actual_minutes: i32,
        learned: bool,
        completed_at: Timestamp,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                status = 'completed',
                actual_minutes = $2,
                learned = $3,
                completed_at = $4
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(actual_minutes)
            .bind(learned)
            .bind(completed_at)
            .fetch_optional(conn)
            .await
    }
}
