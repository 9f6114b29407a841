//! Route definitions for the `/news` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
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
        .route("/", get(news::list).post(news::create))
        .route(
            "/{id}",
            get(news::get_by_id)
                .patch(news::update)
                .put(news::update)
                .delete(news::delete),
        )
}
