//! Handlers shared by `/research-areas`, `/research-directions` and
//! `/research-features`.
//!
//! Each router layer installs its [`ResearchKind`] as an extension; the
//! handlers dispatch through whichever [`ResearchStore`] backend the state
//! carries.
//!
//! [`ResearchStore`]: labsite_db::research_store::ResearchStore

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use labsite_core::error::CoreError;
use labsite_core::listing::{apply_limit, parse_flag, parse_limit};
use labsite_core::research::{CreateResearchItem, ResearchItem, ResearchKind, UpdateResearchItem};
use labsite_core::types::{DbId, SuccessResponse};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::{present, ResearchParams};
use crate::state::AppState;

/// GET /api/research-{kind}
///
/// Sorted by `order`. `active=true` hides inactive items before `limit`.
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<ResearchKind>,
    AppQuery(params): AppQuery<ResearchParams>,
) -> AppResult<Json<Vec<ResearchItem>>> {
    let mut items = state.research.list(kind).await?;
    if parse_flag(present(&params.active)) == Some(true) {
        items.retain(|item| item.is_active);
    }
    let limit = parse_limit(present(&params.limit));
    Ok(Json(apply_limit(items, limit)))
}

/// GET /api/research-{kind}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(kind): Extension<ResearchKind>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ResearchItem>> {
    let item = state
        .research
        .find_by_id(kind, id)
        .await?
        .ok_or(CoreError::not_found(kind.entity_name(), id))?;
    Ok(Json(item))
}

/// POST /api/research-{kind}
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<ResearchKind>,
    AppJson(input): AppJson<CreateResearchItem>,
) -> AppResult<(StatusCode, Json<ResearchItem>)> {
    input.validate(kind)?;
    let item = state.research.create(kind, &input).await?;
    tracing::info!(%kind, id = item.id, order = item.order, "Research item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH|PUT /api/research-{kind}/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<ResearchKind>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<UpdateResearchItem>,
) -> AppResult<Json<ResearchItem>> {
    patch.validate(kind)?;
    let item = state
        .research
        .update(kind, id, patch)
        .await?
        .ok_or(CoreError::not_found(kind.entity_name(), id))?;
    tracing::info!(%kind, id, "Research item updated");
    Ok(Json(item))
}

/// DELETE /api/research-{kind}/{id}
///
/// The remaining items are renumbered `1..=N`.
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<ResearchKind>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !state.research.delete(kind, id).await? {
        return Err(CoreError::not_found(kind.entity_name(), id).into());
    }
    tracing::info!(%kind, id, "Research item deleted");
    Ok(Json(SuccessResponse { success: true }))
}
