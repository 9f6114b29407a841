use labsite_core::research::ResearchItem;
use labsite_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::flag;

/// A row from the `research_items` table. `kind` selects the listing the
/// item belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct ResearchItemRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub sort_order: i64,
    pub is_active: i64,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl From<ResearchItemRow> for ResearchItem {
    fn from(row: ResearchItemRow) -> Self {
        ResearchItem {
            id: row.id,
            title: row.title,
            description: row.description,
            link: row.link,
            order: row.sort_order,
            is_active: flag(row.is_active),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
