//! Achievement listing and progress toward locked entries.

use axum::extract::State;
use axum::Json;
use devquest_core::achievements::{self, ProgressSnapshot};
use devquest_core::error::CoreError;
use devquest_db::models::achievement::Achievement;
use devquest_db::repositories::achievement_repo::AchievementRepo;
use devquest_db::repositories::user_repo::UserRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Progress toward one catalog entry, unlocked or not.
#[derive(Debug, Serialize)]
pub struct AchievementProgress {
    pub criterion: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
    pub unlocked_at: Option<devquest_core::types::Timestamp>,
    pub current: f64,
    pub threshold: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: ProgressSnapshot,
    pub achievements: Vec<AchievementProgress>,
}

fn progress_for(stats: &ProgressSnapshot, unlocked: &[Achievement]) -> Vec<AchievementProgress> {
    achievements::CATALOG
        .iter()
        .map(|def| {
            let key = def.criterion.as_str();
            let row = unlocked.iter().find(|a| a.criterion == key);
            AchievementProgress {
                criterion: key,
                name: def.name,
                description: def.description,
                icon: def.icon,
                unlocked: row.is_some(),
                unlocked_at: row.map(|a| a.unlocked_at),
                // Cap so clients can render a full bar without clamping.
                current: def.current(stats).min(def.threshold),
                threshold: def.threshold,
            }
        })
        .collect()
}

/// `GET /api/achievements`
pub async fn list_achievements(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Achievement>>>> {
    let unlocked = AchievementRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: unlocked }))
}

/// `GET /api/achievements/stats`
///
/// The user's progression counters plus per-achievement progress. Runs a
/// catch-up check first so an unlock missed by a failed background task
/// still appears here.
pub async fn get_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<StatsResponse>>> {
    state
        .progression
        .achievements()
        .check_and_unlock(user.user_id)
        .await;

    let profile = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        })?;
    let unlocked = AchievementRepo::list_for_user(&state.pool, user.user_id).await?;

    let stats = profile.progress();
    Ok(Json(DataResponse {
        data: StatsResponse {
            achievements: progress_for(&stats, &unlocked),
            stats,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked_row(criterion: &str) -> Achievement {
        let def = achievements::find(criterion).unwrap();
        Achievement {
            id: 1,
            user_id: 1,
            criterion: criterion.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            unlocked_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn progress_caps_current_at_threshold() {
        let stats = ProgressSnapshot {
            xp: 750,
            coins: 0,
            streak: 0,
            tasks_completed: 10,
            total_hours_coded: 0.0,
        };
        let progress = progress_for(&stats, &[unlocked_row("first_task")]);

        let first = progress.iter().find(|p| p.criterion == "first_task").unwrap();
        assert!(first.unlocked);
        assert!(first.unlocked_at.is_some());
        assert_eq!(first.current, first.threshold);

        let xp_1000 = progress.iter().find(|p| p.criterion == "xp_1000").unwrap();
        assert!(!xp_1000.unlocked);
        assert!(xp_1000.unlocked_at.is_none());
        assert_eq!(xp_1000.current, 750.0);
        assert_eq!(xp_1000.threshold, 1000.0);
    }

    #[test]
    fn progress_covers_whole_catalog() {
        let stats = ProgressSnapshot {
            xp: 0,
            coins: 0,
            streak: 0,
            tasks_completed: 0,
            total_hours_coded: 0.0,
        };
        assert_eq!(
            progress_for(&stats, &[]).len(),
            devquest_core::achievements::CATALOG.len()
        );
    }
}
