//! Route definitions for the `/tasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /tasks                -> list_tasks
/// POST   /tasks                -> create_task
/// GET    /tasks/{id}           -> get_task
/// PUT    /tasks/{id}           -> update_task
/// DELETE /tasks/{id}           -> delete_task
/// POST   /tasks/{id}/complete  -> complete_task (rewarded)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/{id}/complete", post(tasks::complete_task))
}
