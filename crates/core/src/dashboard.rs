use serde::{Deserialize, Serialize};

use crate::news::News;

/// Aggregate counts and latest news shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub team_member_count: i64,
    pub publication_count: i64,
    pub project_count: i64,
    pub news_count: i64,
    pub patent_count: i64,
    pub todo_item_count: i64,
    pub recent_news: Vec<News>,
}
