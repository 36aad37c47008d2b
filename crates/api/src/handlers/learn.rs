//! Per-task learning resources.

use axum::extract::{Path, State};
use axum::Json;
use devquest_ai::LearningResources;
use devquest_core::error::CoreError;
use devquest_core::types::DbId;
use devquest_db::repositories::task_repo::TaskRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// `GET /api/learn/resources/{task_id}`
///
/// Generates study material for a task. Like challenge generation this
/// never fails outward: an unreachable AI backend degrades to the
/// technology-keyed fallback content.
pub async fn task_resources(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<LearningResources>>> {
    let task = TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .filter(|t| t.user_id == user.user_id)
        .ok_or(CoreError::NotFound {
            entity: "task",
            id: task_id,
        })?;

    let resources = state
        .ai_client
        .generate_resources(&task.name, task.description.as_deref())
        .await;

    Ok(Json(DataResponse { data: resources }))
}
