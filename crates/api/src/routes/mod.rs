pub mod achievements;
pub mod auth;
pub mod challenges;
pub mod health;
pub mod leaderboard;
pub mod learn;
pub mod profile;
pub mod tasks;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                              WebSocket (token via query param)
///
/// /auth/register                   register (public)
/// /auth/login                      login (public)
///
/// /profile                         get, update
///
/// /tasks                           list, create
/// /tasks/{id}                      update, delete
/// /tasks/{id}/complete             rewarded completion (POST)
///
/// /challenges/daily                today's challenge, generated on demand
/// /challenges/{id}/complete        rewarded completion (POST)
///
/// /learn/resources/{task_id}       AI learning resources for a task
///
/// /achievements                    unlocked achievements
/// /achievements/stats              progression counters + achievement progress
/// /leaderboard                     top users by XP + caller's rank
/// ```
///
/// Everything except `/auth/*` requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::handler::ws_handler))
        .merge(auth::router())
        .merge(profile::router())
        .merge(tasks::router())
        .merge(challenges::router())
        .merge(learn::router())
        .merge(achievements::router())
        .merge(leaderboard::router())
}
