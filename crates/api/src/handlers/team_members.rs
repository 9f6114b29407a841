//! Handlers for the `/team-members` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labsite_core::error::CoreError;
use labsite_core::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
use labsite_core::types::{DbId, SuccessResponse};
use labsite_db::repositories::TeamMemberRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::{parse_filter, present, TeamMemberParams};
use crate::state::AppState;

const ENTITY: &str = "TeamMember";

/// GET /api/team-members
///
/// `category` takes precedence over `search`.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TeamMemberParams>,
) -> AppResult<Json<Vec<TeamMember>>> {
    let members = if let Some(category) = present(&params.category) {
        TeamMemberRepo::list_by_category(&state.pool, parse_filter(category)?).await?
    } else if let Some(query) = present(&params.search) {
        TeamMemberRepo::search(&state.pool, query).await?
    } else {
        TeamMemberRepo::list(&state.pool).await?
    };
    Ok(Json(members))
}

/// GET /api/team-members/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<TeamMember>> {
    let member = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    Ok(Json(member))
}

/// POST /api/team-members
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTeamMember>,
) -> AppResult<(StatusCode, Json<TeamMember>)> {
    input.validate()?;
    let member = TeamMemberRepo::create(&state.pool, &input).await?;
    tracing::info!(id = member.id, "Team member created");
    Ok((StatusCode::CREATED, Json(member)))
}

/// PATCH|PUT /api/team-members/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<UpdateTeamMember>,
) -> AppResult<Json<TeamMember>> {
    patch.validate()?;
    let member = TeamMemberRepo::update(&state.pool, id, patch)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    tracing::info!(id, "Team member updated");
    Ok(Json(member))
}

/// DELETE /api/team-members/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !TeamMemberRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(ENTITY, id).into());
    }
    tracing::info!(id, "Team member deleted");
    Ok(Json(SuccessResponse { success: true }))
}
