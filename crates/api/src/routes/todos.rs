//! Route definitions for the `/todos` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::todos;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PATCH  /{id}         -> update
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// PATCH  /{id}/toggle  -> toggle
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todos::list).post(todos::create))
        .route(
            "/{id}",
            get(todos::get_by_id)
                .patch(todos::update)
                .put(todos::update)
                .delete(todos::delete),
        )
        .route("/{id}/toggle", patch(todos::toggle))
}
