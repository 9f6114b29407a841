use labsite_core::project::Project;
use labsite_core::types::{Date, DbId};
use sqlx::FromRow;

use super::flag;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub funding_source: String,
    pub funding_amount: Option<f64>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub leader: String,
    pub is_active: i64,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            source: row.funding_source,
            funding_amount: row.funding_amount,
            start_date: row.start_date,
            end_date: row.end_date,
            leader: row.leader,
            is_active: flag(row.is_active),
        }
    }
}
