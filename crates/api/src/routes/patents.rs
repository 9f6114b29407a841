//! Route definitions for the `/patents` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::patents;
use crate::state::AppState;

/// Routes mounted at `/patents`.
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
        .route("/", get(patents::list).post(patents::create))
        .route(
            "/{id}",
            get(patents::get_by_id)
                .patch(patents::update)
                .put(patents::update)
                .delete(patents::delete),
        )
}
