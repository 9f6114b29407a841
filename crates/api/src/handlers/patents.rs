//! Handlers for the `/patents` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labsite_core::error::CoreError;
use labsite_core::listing::parse_flag;
use labsite_core::patent::{CreatePatent, Patent, UpdatePatent};
use labsite_core::types::{DbId, SuccessResponse};
use labsite_db::repositories::PatentRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::{parse_filter, present, PatentParams};
use crate::state::AppState;

const ENTITY: &str = "Patent";

/// GET /api/patents
///
/// Precedence: `search` > `status` > `type` > `highlighted=true`.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PatentParams>,
) -> AppResult<Json<Vec<Patent>>> {
    let patents = if let Some(query) = present(&params.search) {
        PatentRepo::search(&state.pool, query).await?
    } else if let Some(status) = present(&params.status) {
        PatentRepo::list_by_status(&state.pool, parse_filter(status)?).await?
    } else if let Some(patent_type) = present(&params.patent_type) {
        PatentRepo::list_by_type(&state.pool, parse_filter(patent_type)?).await?
    } else if parse_flag(present(&params.highlighted)) == Some(true) {
        PatentRepo::list_highlighted(&state.pool).await?
    } else {
        PatentRepo::list(&state.pool).await?
    };
    Ok(Json(patents))
}

/// GET /api/patents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Patent>> {
    let patent = PatentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    Ok(Json(patent))
}

/// POST /api/patents
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePatent>,
) -> AppResult<(StatusCode, Json<Patent>)> {
    input.validate()?;
    let patent = PatentRepo::create(&state.pool, &input).await?;
    tracing::info!(id = patent.id, "Patent created");
    Ok((StatusCode::CREATED, Json(patent)))
}

/// PATCH|PUT /api/patents/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<UpdatePatent>,
) -> AppResult<Json<Patent>> {
    patch.validate()?;
    let patent = PatentRepo::update(&state.pool, id, patch)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    tracing::info!(id, "Patent updated");
    Ok(Json(patent))
}

/// DELETE /api/patents/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !PatentRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(ENTITY, id).into());
    }
    tracing::info!(id, "Patent deleted");
    Ok(Json(SuccessResponse { success: true }))
}
