//! Achievement entity model.

use devquest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full achievement row from the `achievements` table.
///
/// At most one row exists per `(user_id, criterion)` pair; `unlocked_at` is
/// set on insert and never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub user_id: DbId,
    pub criterion: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: Timestamp,
}
