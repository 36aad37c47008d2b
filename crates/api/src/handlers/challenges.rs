//! Daily challenge retrieval, generation, and completion.

use axum::extract::{Path, State};
use axum::Json;
use devquest_core::error::CoreError;
use devquest_core::rewards::clamp_challenge_bonus;
use devquest_core::streak::day_start;
use devquest_core::types::DbId;
use devquest_db::models::challenge::{Challenge, CreateChallenge};
use devquest_db::repositories::challenge_repo::ChallengeRepo;
use devquest_db::repositories::user_repo::UserRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::progression::StatsSummary;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CompleteChallengeResponse {
    pub challenge: Challenge,
    pub stats: StatsSummary,
    pub xp_awarded: i32,
    pub milestone_message: Option<String>,
}

/// `GET /api/challenges/daily`
///
/// Returns today's open challenge, generating one on first request of the
/// day. Generation is personalized from the user's tech stack and learning
/// goals; when the AI backend is unavailable a deterministic fallback is
/// used, so this endpoint always produces a challenge.
pub async fn daily_challenge(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Challenge>>> {
    let now = chrono::Utc::now();

    if let Some(existing) =
        ChallengeRepo::find_open_since(&state.pool, user.user_id, day_start(now)).await?
    {
        return Ok(Json(DataResponse { data: existing }));
    }

    let profile = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        })?;

    let generated = state
        .ai_client
        .generate_challenge(&profile.tech_stack, &profile.learning_goals)
        .await;

    let challenge = ChallengeRepo::create(
        &state.pool,
        user.user_id,
        &CreateChallenge {
            title: generated.title,
            description: generated.description,
            // Model output is untrusted; hold the bonus to the 50-100 band.
            xp_bonus: clamp_challenge_bonus(generated.xp_bonus),
            kind: generated.kind,
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, challenge_id = challenge.id, "daily challenge generated");

    Ok(Json(DataResponse { data: challenge }))
}

/// `POST /api/challenges/{id}/complete`
pub async fn complete_challenge(
    State(state): State<AppState>,
    user: AuthUser,
    Path(challenge_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompleteChallengeResponse>>> {
    let completion = state
        .progression
        .complete_challenge(user.user_id, challenge_id)
        .await?;

    Ok(Json(DataResponse {
        data: CompleteChallengeResponse {
            challenge: completion.challenge,
            stats: completion.stats,
            xp_awarded: completion.xp_awarded,
            milestone_message: completion.milestone_message,
        },
    }))
}
