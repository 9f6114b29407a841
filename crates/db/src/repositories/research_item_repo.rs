//! SQLite backend for research listings: the `research_items` table, one
//! row per item with a `kind` discriminator.

use async_trait::async_trait;
use chrono::Utc;
use labsite_core::ordering::{normalize_create_order, renumber};
use labsite_core::research::{CreateResearchItem, ResearchItem, ResearchKind, UpdateResearchItem};
use labsite_core::types::DbId;
use labsite_core::validation::optional_text;
use sqlx::SqliteConnection;

use crate::models::research_item::ResearchItemRow;
use crate::models::to_flag;
use crate::research_store::ResearchStore;
use crate::{DbPool, StoreError};

/// Column list for `research_items` queries.
const COLUMNS: &str = "id, title, description, link, sort_order, is_active, created_at, updated_at";

/// [`ResearchStore`] over the main database.
pub struct SqliteResearchStore {
    pool: DbPool,
}

impl SqliteResearchStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn list_in(
        conn: &mut SqliteConnection,
        kind: ResearchKind,
    ) -> Result<Vec<ResearchItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM research_items WHERE kind = $1 ORDER BY sort_order, id"
        );
        let rows = sqlx::query_as::<_, ResearchItemRow>(&query)
            .bind(kind.as_str())
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(ResearchItem::from).collect())
    }
}

#[async_trait]
impl ResearchStore for SqliteResearchStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn list(&self, kind: ResearchKind) -> Result<Vec<ResearchItem>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(Self::list_in(&mut conn, kind).await?)
    }

    async fn find_by_id(
        &self,
        kind: ResearchKind,
        id: DbId,
    ) -> Result<Option<ResearchItem>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM research_items WHERE kind = $1 AND id = $2");
        let row = sqlx::query_as::<_, ResearchItemRow>(&query)
            .bind(kind.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ResearchItem::from))
    }

    async fn create(
        &self,
        kind: ResearchKind,
        input: &CreateResearchItem,
    ) -> Result<ResearchItem, StoreError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let existing = Self::list_in(&mut tx, kind).await?;
        let order = normalize_create_order(input.order, &existing);
        let explicit_link = optional_text(input.link.clone());

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO research_items (\
                kind, title, description, link, sort_order, is_active, created_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING id",
        )
        .bind(kind.as_str())
        .bind(&input.title)
        .bind(optional_text(input.description.clone()))
        .bind(explicit_link.as_deref())
        .bind(order)
        .bind(to_flag(input.is_active.unwrap_or(true)))
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let item = input.clone().into_item(kind, id, order, now);

        // Default links embed the id, which only exists after the insert.
        if explicit_link.is_none() && item.link.is_some() {
            sqlx::query("UPDATE research_items SET link = $1 WHERE id = $2")
                .bind(item.link.as_deref())
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(item)
    }

    async fn update(
        &self,
        kind: ResearchKind,
        id: DbId,
        patch: UpdateResearchItem,
    ) -> Result<Option<ResearchItem>, StoreError> {
        let Some(mut item) = self.find_by_id(kind, id).await? else {
            return Ok(None);
        };
        item.apply(patch, Utc::now());

        let result = sqlx::query(
            "UPDATE research_items SET \
                title = $1, description = $2, link = $3, sort_order = $4, \
                is_active = $5, updated_at = $6 \
             WHERE kind = $7 AND id = $8",
        )
        .bind(&item.title)
        .bind(item.description.as_deref())
        .bind(item.link.as_deref())
        .bind(item.order)
        .bind(to_flag(item.is_active))
        .bind(item.updated_at)
        .bind(kind.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok((result.rows_affected() > 0).then_some(item))
    }

    /// Delete and renumber inside one transaction.
    async fn delete(&self, kind: ResearchKind, id: DbId) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM research_items WHERE kind = $1 AND id = $2")
            .bind(kind.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        let mut survivors = Self::list_in(&mut tx, kind).await?;
        let changed = renumber(&mut survivors);
        for item in survivors.iter().filter(|item| changed.contains(&item.id)) {
            sqlx::query("UPDATE research_items SET sort_order = $1 WHERE id = $2")
                .bind(item.order)
                .bind(item.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
