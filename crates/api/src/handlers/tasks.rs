//! Task CRUD and completion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use devquest_core::error::CoreError;
use devquest_core::rewards::Difficulty;
use devquest_core::types::DbId;
use devquest_db::models::task::{CreateTask, Task, UpdateTask};
use devquest_db::repositories::task_repo::TaskRepo;
use devquest_events::bus::DomainEvent;
use devquest_events::types as event_types;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::progression::StatsSummary;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompleteTaskRequest {
    pub actual_minutes: i32,
    #[serde(default)]
    pub learned: bool,
}

#[derive(Debug, Serialize)]
pub struct CompleteTaskResponse {
    pub task: Task,
    pub stats: StatsSummary,
    pub xp_awarded: i32,
    pub milestone_message: Option<String>,
}

fn validate_task_fields(difficulty: &str, estimated_minutes: i32) -> Result<(), CoreError> {
    Difficulty::parse(difficulty)?;
    if estimated_minutes <= 0 {
        return Err(CoreError::Validation(
            "Estimated time must be a positive number of minutes".into(),
        ));
    }
    Ok(())
}

/// Fetch a task and check the caller owns it. Other users' tasks read as 404
/// rather than 403 so ids are not probeable.
async fn owned_task(state: &AppState, user_id: DbId, task_id: DbId) -> AppResult<Task> {
    Ok(TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .filter(|t| t.user_id == user_id)
        .ok_or(CoreError::NotFound {
            entity: "task",
            id: task_id,
        })?)
}

/// `GET /api/tasks`
pub async fn list_tasks(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let tasks = TaskRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// `POST /api/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<DataResponse<Task>>)> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Task name must not be empty".into()).into());
    }
    validate_task_fields(&input.difficulty, input.estimated_minutes)?;

    let task = TaskRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// `GET /api/tasks/{id}`
pub async fn get_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = owned_task(&state, user.user_id, task_id).await?;
    Ok(Json(DataResponse { data: task }))
}

/// `PUT /api/tasks/{id}`
///
/// Only pending tasks can be edited; completed tasks are immutable history.
pub async fn update_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = owned_task(&state, user.user_id, task_id).await?;
    if task.is_completed() {
        return Err(CoreError::InvalidState("Completed tasks cannot be edited".into()).into());
    }
    if let Some(difficulty) = &input.difficulty {
        Difficulty::parse(difficulty)?;
    }
    if let Some(estimated) = input.estimated_minutes {
        if estimated <= 0 {
            return Err(CoreError::Validation(
                "Estimated time must be a positive number of minutes".into(),
            )
            .into());
        }
    }

    let updated = TaskRepo::update_pending(&state.pool, task_id, &input)
        .await?
        .ok_or_else(|| CoreError::InvalidState("Completed tasks cannot be edited".into()))?;
    Ok(Json(DataResponse { data: updated }))
}

/// `DELETE /api/tasks/{id}`
///
/// Deleting a task never unwinds progression already earned from it.
pub async fn delete_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let task = owned_task(&state, user.user_id, task_id).await?;
    TaskRepo::delete(&state.pool, task.id).await?;

    state.event_bus.publish(
        DomainEvent::new(event_types::TASK_DELETED)
            .for_user(user.user_id)
            .with_payload(serde_json::json!({ "task_id": task.id })),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/tasks/{id}/complete`
pub async fn complete_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
    Json(req): Json<CompleteTaskRequest>,
) -> AppResult<Json<DataResponse<CompleteTaskResponse>>> {
    let completion = state
        .progression
        .complete_task(user.user_id, task_id, req.actual_minutes, req.learned)
        .await?;

    Ok(Json(DataResponse {
        data: CompleteTaskResponse {
            task: completion.task,
            stats: completion.stats,
            xp_awarded: completion.xp_awarded,
            milestone_message: completion.milestone_message,
        },
    }))
}
