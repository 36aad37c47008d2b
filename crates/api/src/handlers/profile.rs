//! Profile read and update.

use axum::extract::State;
use axum::Json;
use devquest_core::error::CoreError;
use devquest_db::models::user::{UpdateProfile, UserResponse};
use devquest_db::repositories::user_repo::UserRepo;

use crate::error::AppResult;
use crate::handlers::auth::normalize_email;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// `GET /api/profile`
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let found = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        })?;
    Ok(Json(DataResponse { data: found.into() }))
}

/// `PUT /api/profile`
///
/// Partial update: absent fields keep their current value.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    // Store emails in canonical form, same as registration.
    if let Some(email) = input.email.take() {
        input.email = Some(normalize_email(&email)?);
    }
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("Name must not be empty".into()).into());
        }
    }

    let updated = UserRepo::update_profile(&state.pool, user.user_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user.user_id,
        })?;
    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}
