//! Handlers for the `/news` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labsite_core::error::CoreError;
use labsite_core::listing::{apply_limit, parse_flag, parse_limit};
use labsite_core::news::{CreateNews, News, UpdateNews};
use labsite_core::types::{DbId, SuccessResponse};
use labsite_db::repositories::NewsRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::{present, NewsParams};
use crate::state::AppState;

const ENTITY: &str = "News";

/// GET /api/news
///
/// `published=true` hides drafts; `limit` keeps the first N by publish date.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<NewsParams>,
) -> AppResult<Json<Vec<News>>> {
    let news = if parse_flag(present(&params.published)) == Some(true) {
        NewsRepo::list_published(&state.pool).await?
    } else {
        NewsRepo::list(&state.pool).await?
    };
    let limit = parse_limit(present(&params.limit));
    Ok(Json(apply_limit(news, limit)))
}

/// GET /api/news/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<News>> {
    let news = NewsRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    Ok(Json(news))
}

/// POST /api/news
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateNews>,
) -> AppResult<(StatusCode, Json<News>)> {
    input.validate()?;
    let news = NewsRepo::create(&state.pool, &input).await?;
    tracing::info!(id = news.id, "News created");
    Ok((StatusCode::CREATED, Json(news)))
}

/// PATCH|PUT /api/news/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<UpdateNews>,
) -> AppResult<Json<News>> {
    patch.validate()?;
    let news = NewsRepo::update(&state.pool, id, patch)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    tracing::info!(id, "News updated");
    Ok(Json(news))
}

/// DELETE /api/news/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !NewsRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(ENTITY, id).into());
    }
    tracing::info!(id, "News deleted");
    Ok(Json(SuccessResponse { success: true }))
}
