//! Route definitions for the `/challenges` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::challenges;
use crate::state::AppState;

/// Routes mounted at `/challenges`.
///
/// ```text
/// GET  /challenges/daily          -> daily_challenge
/// POST /challenges/{id}/complete  -> complete_challenge (rewarded)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/challenges/daily", get(challenges::daily_challenge))
        .route(
            "/challenges/{id}/complete",
            post(challenges::complete_challenge),
        )
}
