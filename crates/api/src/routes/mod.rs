pub mod auth;
pub mod health;
pub mod news;
pub mod patents;
pub mod projects;
pub mod publications;
pub mod research;
pub mod team_members;
pub mod todos;
pub mod users;

use axum::routing::get;
use axum::Router;
use labsite_core::research::ResearchKind;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /team-members                  list, create
/// /team-members/{id}             get, update, delete
/// /publications                  list, create
/// /publications/{id}             get, update, delete
/// /patents                       list, create
/// /patents/{id}                  get, update, delete
/// /projects                      list, create
/// /projects/{id}                 get, update, delete
/// /news                          list, create
/// /news/{id}                     get, update, delete
///
/// /research-areas                list, create
/// /research-areas/{id}           get, update, delete
/// /research-directions           list, create
/// /research-directions/{id}      get, update, delete
/// /research-features             list, create
/// /research-features/{id}        get, update, delete
///
/// /todos                         list, create
/// /todos/{id}                    get, update, delete
/// /todos/{id}/toggle             toggle completion (PATCH)
///
/// /users                         list, create
/// /users/{id}                    get, update, delete
/// /auth/login                    verify credentials (POST)
///
/// /dashboard                     counts and recent news (GET)
/// /background-images             landing page images (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    let mut api = Router::new()
        .nest("/team-members", team_members::router())
        .nest("/publications", publications::router())
        .nest("/patents", patents::router())
        .nest("/projects", projects::router())
        .nest("/news", news::router())
        .nest("/todos", todos::router())
        .nest("/users", users::router())
        .nest("/auth", auth::router())
        .route("/dashboard", get(handlers::dashboard::summary))
        .route(
            "/background-images",
            get(handlers::media::background_images),
        );

    for &kind in ResearchKind::ALL {
        api = api.nest(&format!("/{}", kind.route_segment()), research::router(kind));
    }
    api
}
