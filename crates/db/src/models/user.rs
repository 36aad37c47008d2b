//! User entity model and DTOs.

use devquest_core::achievements::ProgressSnapshot;
use devquest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub username: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub bio: Option<String>,
    pub tech_stack: Vec<String>,
    pub learning_goals: Vec<String>,
    pub xp: i32,
    pub coins: i32,
    pub streak: i32,
    pub tasks_completed: i32,
    pub total_hours_coded: f64,
    pub last_completion_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl User {
    /// Snapshot of the stats the achievement catalog evaluates against.
    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            xp: self.xp,
            coins: self.coins,
            streak: self.streak,
            tasks_completed: self.tasks_completed,
            total_hours_coded: self.total_hours_coded,
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub username: Option<String>,
    pub email: String,
    pub avatar: String,
    pub bio: Option<String>,
    pub tech_stack: Vec<String>,
    pub learning_goals: Vec<String>,
    pub xp: i32,
    pub coins: i32,
    pub streak: i32,
    pub tasks_completed: i32,
    pub total_hours_coded: f64,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            username: u.username,
            email: u.email,
            avatar: u.avatar,
            bio: u.bio,
            tech_stack: u.tech_stack,
            learning_goals: u.learning_goals,
            xp: u.xp,
            coins: u.coins,
            streak: u.streak,
            tasks_completed: u.tasks_completed,
            total_hours_coded: u.total_hours_coded,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub username: Option<String>,
    pub email: String,
    pub password_hash: String,
}

/// DTO for updating a user's profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub learning_goals: Option<Vec<String>>,
}

/// New progression values written back after a rewarded completion.
///
/// Absolute values, not deltas: the progression engine computes them while
/// holding a row lock, so the write is a plain overwrite.
#[derive(Debug, Clone)]
pub struct ProgressionUpdate {
    pub xp: i32,
    pub coins: i32,
    pub streak: i32,
    pub tasks_completed: i32,
    pub total_hours_coded: f64,
    pub last_completion_at: Timestamp,
}

/// Slim row for leaderboard listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub id: DbId,
    pub name: String,
    pub avatar: String,
    pub xp: i32,
    pub streak: i32,
    pub tasks_completed: i32,
    pub total_hours_coded: f64,
}
