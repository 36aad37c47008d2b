//! Registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use devquest_core::error::CoreError;
use devquest_db::models::user::{CreateUser, UserResponse};
use devquest_db::repositories::user_repo::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the authenticated user, returned by both register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Canonical form for stored emails: trimmed and lowercased, so the
/// `uq_users_email` constraint cannot be sidestepped by case variants.
pub(crate) fn normalize_email(raw: &str) -> Result<String, CoreError> {
    let email = raw.trim().to_lowercase();
    if !email.contains('@') {
        return Err(CoreError::Validation("Invalid email address".into()));
    }
    Ok(email)
}

/// `POST /api/auth/register`
///
/// Duplicate emails surface as 409 via the `uq_users_email` constraint
/// rather than a racy pre-check.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()).into());
    }
    let email = normalize_email(&req.email)?;
    validate_password_strength(&req.password).map_err(CoreError::Validation)?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: name.to_string(),
            username: req.username.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()),
            email,
            password_hash,
        },
    )
    .await?;

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AuthResponse {
                token,
                user: user.into(),
            },
        }),
    ))
}

/// `POST /api/auth/login`
///
/// A wrong email and a wrong password produce the same 401 so the endpoint
/// does not leak which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let email = req.email.trim().to_lowercase();

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid email or password".into()))?;

    let valid = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("password verification failed: {e}")))?;
    if !valid {
        return Err(CoreError::Unauthorized("Invalid email or password".into()).into());
    }

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(DataResponse {
        data: AuthResponse {
            token,
            user: user.into(),
        },
    }))
}
