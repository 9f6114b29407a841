//! Route definitions for the `/team-members` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::team_members;
use crate::state::AppState;

/// Routes mounted at `/team-members`.
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
        .route("/", get(team_members::list).post(team_members::create))
        .route(
            "/{id}",
            get(team_members::get_by_id)
                .patch(team_members::update)
                .put(team_members::update)
                .delete(team_members::delete),
        )
}
