//! Repository for the `news` table.

use chrono::Utc;
use labsite_core::news::{CreateNews, News, UpdateNews};
use labsite_core::types::DbId;

use crate::models::news::NewsRow;
use crate::models::to_flag;
use crate::DbPool;

/// Column list for `news` queries.
const COLUMNS: &str = "id, title, content, publish_date, author, image_url, is_published";

/// Provides CRUD operations for news posts.
pub struct NewsRepo;

impl NewsRepo {
    /// List every post, most recent first.
    pub async fn list(pool: &DbPool) -> Result<Vec<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news ORDER BY publish_date DESC, id DESC");
        let rows = sqlx::query_as::<_, NewsRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(News::from).collect())
    }

    pub async fn list_published(pool: &DbPool) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news WHERE is_published = 1 \
             ORDER BY publish_date DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, NewsRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(News::from).collect())
    }

    /// The `limit` most recent posts.
    pub async fn recent(pool: &DbPool, limit: usize) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news ORDER BY publish_date DESC, id DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, NewsRow>(&query)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(News::from).collect())
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        let row = sqlx::query_as::<_, NewsRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(News::from))
    }

    pub async fn create(pool: &DbPool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let draft = input.clone().into_news(0);
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO news (\
                title, content, publish_date, author, image_url, is_published, \
                created_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING id",
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(draft.publish_date)
        .bind(&draft.author)
        .bind(draft.image_url.as_deref())
        .bind(to_flag(draft.is_published))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(News { id, ..draft })
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: UpdateNews,
    ) -> Result<Option<News>, sqlx::Error> {
        let Some(mut news) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        news.apply(patch);

        let result = sqlx::query(
            "UPDATE news SET \
                title = $1, content = $2, publish_date = $3, author = $4, \
                image_url = $5, is_published = $6, updated_at = $7 \
             WHERE id = $8",
        )
        .bind(&news.title)
        .bind(&news.content)
        .bind(news.publish_date)
        .bind(&news.author)
        .bind(news.image_url.as_deref())
        .bind(to_flag(news.is_published))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Ok((result.rows_affected() > 0).then_some(news))
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(pool)
            .await
    }
}
