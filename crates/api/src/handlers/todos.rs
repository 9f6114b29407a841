//! Handlers for the `/todos` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use labsite_core::error::CoreError;
use labsite_core::todo::{CreateTodo, TodoItem, UpdateTodo};
use labsite_core::types::{DbId, SuccessResponse};
use labsite_db::repositories::TodoRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

const ENTITY: &str = "TodoItem";

/// GET /api/todos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TodoItem>>> {
    let todos = TodoRepo::list(&state.pool).await?;
    Ok(Json(todos))
}

/// GET /api/todos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<TodoItem>> {
    let todo = TodoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    Ok(Json(todo))
}

/// POST /api/todos
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTodo>,
) -> AppResult<(StatusCode, Json<TodoItem>)> {
    input.validate()?;
    let todo = TodoRepo::create(&state.pool, &input).await?;
    tracing::info!(id = todo.id, created_by = todo.created_by, "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PATCH|PUT /api/todos/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<UpdateTodo>,
) -> AppResult<Json<TodoItem>> {
    patch.validate()?;
    let todo = TodoRepo::update(&state.pool, id, patch)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    tracing::info!(id, "Todo updated");
    Ok(Json(todo))
}

/// PATCH /api/todos/{id}/toggle
pub async fn toggle(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<TodoItem>> {
    let todo = TodoRepo::toggle(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found(ENTITY, id))?;
    tracing::info!(id, completed = todo.completed, "Todo toggled");
    Ok(Json(todo))
}

/// DELETE /api/todos/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !TodoRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found(ENTITY, id).into());
    }
    tracing::info!(id, "Todo deleted");
    Ok(Json(SuccessResponse { success: true }))
}
