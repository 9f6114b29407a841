//! Handler for the admin dashboard summary.

use axum::extract::State;
use axum::Json;
use labsite_core::dashboard::DashboardSummary;
use labsite_core::news::RECENT_NEWS_COUNT;
use labsite_db::repositories::{
    NewsRepo, PatentRepo, ProjectRepo, PublicationRepo, TeamMemberRepo, TodoRepo,
};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<DashboardSummary>> {
    let pool = &state.pool;
    let (
        team_member_count,
        publication_count,
        project_count,
        news_count,
        patent_count,
        todo_item_count,
        recent_news,
    ) = tokio::try_join!(
        TeamMemberRepo::count(pool),
        PublicationRepo::count(pool),
        ProjectRepo::count(pool),
        NewsRepo::count(pool),
        PatentRepo::count(pool),
        TodoRepo::count(pool),
        NewsRepo::recent(pool, RECENT_NEWS_COUNT),
    )?;

    Ok(Json(DashboardSummary {
        team_member_count,
        publication_count,
        project_count,
        news_count,
        patent_count,
        todo_item_count,
        recent_news,
    }))
}
