//! Route definitions for the three research listings.

use axum::routing::get;
use axum::{Extension, Router};
use labsite_core::research::ResearchKind;

use crate::handlers::research;
use crate::state::AppState;

/// Routes mounted at `/research-{areas,directions,features}`.
///
/// The same handlers serve every kind; `kind` is injected as an extension.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PATCH  /{id}  -> update
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router(kind: ResearchKind) -> Router<AppState> {
    Router::new()
        .route("/", get(research::list).post(research::create))
        .route(
            "/{id}",
            get(research::get_by_id)
                .patch(research::update)
                .put(research::update)
                .delete(research::delete),
        )
        .layer(Extension(kind))
}
