//! Task entity model and DTOs.

use devquest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Task lifecycle state as stored in the `status` column.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";

/// Full task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Lowercase difficulty tier: `easy` / `medium` / `hard`.
    pub difficulty: String,
    pub estimated_minutes: i32,
    /// Reported time spent, set once on completion.
    pub actual_minutes: Option<i32>,
    pub status: String,
    pub learned: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }
}

/// DTO for creating a new task.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub name: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub estimated_minutes: i32,
}

/// DTO for updating a pending task. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub name: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_minutes: Option<i32>,
}
