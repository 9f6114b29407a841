use labsite_core::news::News;
use labsite_core::types::{Date, DbId};
use sqlx::FromRow;

use super::flag;

/// A row from the `news` table.
#[derive(Debug, Clone, FromRow)]
pub struct NewsRow {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub publish_date: Date,
    pub author: String,
    pub image_url: Option<String>,
    pub is_published: i64,
}

impl From<NewsRow> for News {
    fn from(row: NewsRow) -> Self {
        News {
            id: row.id,
            title: row.title,
            content: row.content,
            publish_date: row.publish_date,
            author: row.author,
            is_published: flag(row.is_published),
            image_url: row.image_url,
        }
    }
}
