//! Route definitions for achievements and stats.

use axum::routing::get;
use axum::Router;

use crate::handlers::achievements;
use crate::state::AppState;

/// Routes mounted at `/achievements`.
///
/// ```text
/// GET /achievements        -> list_achievements
/// GET /achievements/stats  -> get_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/achievements", get(achievements::list_achievements))
        .route("/achievements/stats", get(achievements::get_stats))
}
