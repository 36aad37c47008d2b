//! Route definitions for the `/learn` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::learn;
use crate::state::AppState;

/// Routes mounted at `/learn`.
///
/// ```text
/// GET /learn/resources/{task_id}  -> task_resources
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/learn/resources/{task_id}", get(learn::task_resources))
}
