//! XP leaderboard.

use axum::extract::State;
use axum::Json;
use devquest_core::error::CoreError;
use devquest_db::models::user::LeaderboardEntry;
use devquest_db::repositories::user_repo::UserRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many entries the leaderboard exposes.
const LEADERBOARD_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    /// The caller's 1-based rank across all users, including those outside
    /// the returned page.
    pub rank: i64,
}

/// `GET /api/leaderboard`
pub async fn get_leaderboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<LeaderboardResponse>>> {
    let entries = UserRepo::leaderboard(&state.pool, LEADERBOARD_LIMIT).await?;

    let me = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        })?;
    let rank = UserRepo::rank_for_xp(&state.pool, me.xp).await?;

    Ok(Json(DataResponse {
        data: LeaderboardResponse { entries, rank },
    }))
}
