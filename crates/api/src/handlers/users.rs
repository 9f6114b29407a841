//! Handlers for the `/users` resource. Passwords are hashed here and never
//! appear in a response.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labsite_core::error::CoreError;
use labsite_core::types::{DbId, SuccessResponse};
use labsite_core::user::{CreateUser, UpdateUser, User};
use labsite_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

const ENTITY: &str = "User";

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    Ok(Json(user))
}

/// POST /api/users
///
/// A duplicate username or email is a 409.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.validate()?;
    let password_hash = hash_password(&input.password)?;
    let user = UserRepo::create(&state.pool, &input, &password_hash).await?;
    tracing::info!(id = user.id, username = %user.username, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<UpdateUser>,
) -> AppResult<Json<User>> {
    patch.validate()?;
    let password_hash = patch.password.as_deref().map(hash_password).transpose()?;
    let user = UserRepo::update(&state.pool, id, &patch, password_hash.as_deref())
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    tracing::info!(id, password_changed = password_hash.is_some(), "User updated");
    Ok(Json(user))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(ENTITY, id).into());
    }
    tracing::info!(id, "User deleted");
    Ok(Json(SuccessResponse { success: true }))
}
