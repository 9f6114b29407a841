use labsite_core::todo::TodoItem;
use labsite_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;

use super::{flag, parse_text};

/// A row from the `todos` table.
#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: DbId,
    pub text: String,
    pub deadline: Option<Date>,
    pub completed: i64,
    pub priority: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl TryFrom<TodoRow> for TodoItem {
    type Error = sqlx::Error;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        Ok(TodoItem {
            id: row.id,
            text: row.text,
            deadline: row.deadline,
            completed: flag(row.completed),
            priority: parse_text(&row.priority)?,
            created_by: row.created_by,
            created_at: row.created_at,
            completed_at: row.completed_at,
        })
    }
}
