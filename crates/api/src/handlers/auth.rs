//! Handler for `/auth/login`.
//!
//! Login verifies credentials and returns the public user record. No session
//! or token is issued.

use axum::extract::State;
use axum::Json;
use labsite_core::error::CoreError;
use labsite_core::user::{LoginRequest, User};
use labsite_db::repositories::UserRepo;

use crate::auth::password::{check_password, invalid_credentials};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/auth/login
///
/// Unknown user, wrong password and disabled account are all 401.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<User>> {
    let username = input.username.trim();
    let Some(credentials) = UserRepo::find_by_username(&state.pool, username).await? else {
        tracing::info!(username, "Login failed: unknown user");
        return Err(invalid_credentials().into());
    };

    if let Err(err) = check_password(credentials.user.id, &input.password, &credentials.password_hash) {
        tracing::info!(user_id = credentials.user.id, "Login failed: wrong password");
        return Err(err.into());
    }

    let mut user = credentials.user;
    if !user.is_active {
        tracing::info!(user_id = user.id, "Login refused: account disabled");
        return Err(CoreError::Unauthorized("Account is disabled".to_string()).into());
    }

    if let Some(logged_in_at) = UserRepo::record_login(&state.pool, user.id).await? {
        user.last_login = Some(logged_in_at);
    }
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(user))
}
