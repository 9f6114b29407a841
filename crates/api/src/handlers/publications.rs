//! Handlers for the `/publications` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labsite_core::error::CoreError;
use labsite_core::listing::{apply_limit, parse_flag, parse_limit};
use labsite_core::publication::{CreatePublication, Publication, UpdatePublication};
use labsite_core::types::{DbId, SuccessResponse};
use labsite_db::repositories::PublicationRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::{parse_year, present, PublicationParams};
use crate::state::AppState;

const ENTITY: &str = "Publication";

/// GET /api/publications
///
/// Precedence: `year` > `highlighted=true` > `search`. `limit` applies last.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PublicationParams>,
) -> AppResult<Json<Vec<Publication>>> {
    let publications = if let Some(year) = present(&params.year) {
        PublicationRepo::list_by_year(&state.pool, parse_year(year)?).await?
    } else if parse_flag(present(&params.highlighted)) == Some(true) {
        PublicationRepo::list_highlighted(&state.pool).await?
    } else if let Some(query) = present(&params.search) {
        PublicationRepo::search(&state.pool, query).await?
    } else {
        PublicationRepo::list(&state.pool).await?
    };
    let limit = parse_limit(present(&params.limit));
    Ok(Json(apply_limit(publications, limit)))
}

/// GET /api/publications/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Publication>> {
    let publication = PublicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    Ok(Json(publication))
}

/// POST /api/publications
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePublication>,
) -> AppResult<(StatusCode, Json<Publication>)> {
    input.validate()?;
    let publication = PublicationRepo::create(&state.pool, &input).await?;
    tracing::info!(id = publication.id, "Publication created");
    Ok((StatusCode::CREATED, Json(publication)))
}

/// PATCH|PUT /api/publications/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<UpdatePublication>,
) -> AppResult<Json<Publication>> {
    patch.validate()?;
    let publication = PublicationRepo::update(&state.pool, id, patch)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    tracing::info!(id, "Publication updated");
    Ok(Json(publication))
}

/// DELETE /api/publications/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !PublicationRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(ENTITY, id).into());
    }
    tracing::info!(id, "Publication deleted");
    Ok(Json(SuccessResponse { success: true }))
}
