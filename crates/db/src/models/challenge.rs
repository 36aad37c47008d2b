//! Challenge entity model and DTOs.

use devquest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full challenge row from the `challenges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Challenge {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    /// Fixed XP reward, 50-100, set at generation time.
    pub xp_bonus: i32,
    /// Challenge flavor, e.g. `daily_code`.
    pub kind: String,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new challenge.
#[derive(Debug, Deserialize)]
pub struct CreateChallenge {
    pub title: String,
    pub description: String,
    pub xp_bonus: i32,
    pub kind: String,
}
