//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labsite_core::error::CoreError;
use labsite_core::listing::parse_flag;
use labsite_core::project::{CreateProject, Project, UpdateProject};
use labsite_core::types::{DbId, SuccessResponse};
use labsite_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::{present, ProjectParams};
use crate::state::AppState;

const ENTITY: &str = "Project";

/// GET /api/projects
///
/// `search` takes precedence over `isActive`; `isActive=false` selects
/// finished projects.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ProjectParams>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = if let Some(query) = present(&params.search) {
        ProjectRepo::search(&state.pool, query).await?
    } else if let Some(is_active) = parse_flag(present(&params.is_active)) {
        ProjectRepo::list_by_status(&state.pool, is_active).await?
    } else {
        ProjectRepo::list(&state.pool).await?
    };
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    Ok(Json(project))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(id = project.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PATCH|PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    patch.validate()?;
    let project = ProjectRepo::update(&state.pool, id, patch)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    tracing::info!(id, "Project updated");
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(ENTITY, id).into());
    }
    tracing::info!(id, "Project deleted");
    Ok(Json(SuccessResponse { success: true }))
}
