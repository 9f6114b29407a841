//! Route definitions for the `/publications` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::publications;
use crate::state::AppState;

/// Routes mounted at `/publications`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PATCH  /{id}  -> update
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(publications::list).post(publications::create))
        .route(
            "/{id}",
            get(publications::get_by_id)
                .patch(publications::update)
                .put(publications::update)
                .delete(publications::delete),
        )
}
