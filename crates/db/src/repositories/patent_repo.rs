//! Repository for the `patents` table.

use chrono::Utc;
use labsite_core::patent::{CreatePatent, Patent, PatentStatus, PatentType, UpdatePatent};
use labsite_core::types::DbId;

use super::decode_all;
use crate::models::patent::PatentRow;
use crate::models::{encode_json, to_flag};
use crate::{DbPool, StoreError};

/// Column list for `patents` queries.
const COLUMNS: &str = "\
    id, title, inventors, inventor_ids, patent_number, application_date, \
    grant_date, abstract, keywords, status, patent_type, pdf_url, is_highlighted";

/// Provides CRUD operations for patents.
pub struct PatentRepo;

impl PatentRepo {
    /// List every patent, most recent application first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Patent>, sqlx::Error> {
        Self::list_where(pool, "1 = 1", None).await
    }

    pub async fn list_highlighted(pool: &DbPool) -> Result<Vec<Patent>, sqlx::Error> {
        Self::list_where(pool, "is_highlighted = 1", None).await
    }

    pub async fn list_by_status(
        pool: &DbPool,
        status: PatentStatus,
    ) -> Result<Vec<Patent>, sqlx::Error> {
        Self::list_where(pool, "status = $1", Some(status.as_str())).await
    }

    pub async fn list_by_type(
        pool: &DbPool,
        patent_type: PatentType,
    ) -> Result<Vec<Patent>, sqlx::Error> {
        Self::list_where(pool, "patent_type = $1", Some(patent_type.as_str())).await
    }

    /// Case-insensitive search over title, inventors, patent number and
    /// abstract.
    pub async fn search(pool: &DbPool, query: &str) -> Result<Vec<Patent>, sqlx::Error> {
        let mut patents = Self::list(pool).await?;
        patents.retain(|patent| patent.matches_query(query));
        Ok(patents)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Patent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patents WHERE id = $1");
        sqlx::query_as::<_, PatentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(Patent::try_from)
            .transpose()
    }

    pub async fn create(pool: &DbPool, input: &CreatePatent) -> Result<Patent, sqlx::Error> {
        let draft = input.clone().into_patent(0);
        let inventor_ids = draft.inventor_ids.as_ref().map(encode_json).transpose()?;
        let keywords = encode_json(&draft.keywords)?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO patents (\
                title, inventors, inventor_ids, patent_number, application_date, \
                grant_date, abstract, keywords, status, patent_type, pdf_url, \
                is_highlighted, created_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13) \
             RETURNING id",
        )
        .bind(&draft.title)
        .bind(&draft.inventors)
        .bind(inventor_ids)
        .bind(&draft.patent_number)
        .bind(draft.application_date)
        .bind(draft.grant_date)
        .bind(draft.abstract_text.as_deref())
        .bind(keywords)
        .bind(draft.status.as_str())
        .bind(draft.patent_type.as_str())
        .bind(draft.pdf_url.as_deref())
        .bind(to_flag(draft.is_highlighted))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Patent { id, ..draft })
    }

    /// Merge `patch` over the stored patent. Fails with a validation error
    /// when the merged grant date precedes the application date.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: UpdatePatent,
    ) -> Result<Option<Patent>, StoreError> {
        let Some(mut patent) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        patent.apply(patch)?;

        let inventor_ids = patent.inventor_ids.as_ref().map(encode_json).transpose()?;
        let keywords = encode_json(&patent.keywords)?;

        let result = sqlx::query(
            "UPDATE patents SET \
                title = $1, inventors = $2, inventor_ids = $3, patent_number = $4, \
                application_date = $5, grant_date = $6, abstract = $7, keywords = $8, \
                status = $9, patent_type = $10, pdf_url = $11, is_highlighted = $12, \
                updated_at = $13 \
             WHERE id = $14",
        )
        .bind(&patent.title)
        .bind(&patent.inventors)
        .bind(inventor_ids)
        .bind(&patent.patent_number)
        .bind(patent.application_date)
        .bind(patent.grant_date)
        .bind(patent.abstract_text.as_deref())
        .bind(keywords)
        .bind(patent.status.as_str())
        .bind(patent.patent_type.as_str())
        .bind(patent.pdf_url.as_deref())
        .bind(to_flag(patent.is_highlighted))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Ok((result.rows_affected() > 0).then_some(patent))
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM patents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM patents")
            .fetch_one(pool)
            .await
    }

    async fn list_where(
        pool: &DbPool,
        condition: &str,
        value: Option<&str>,
    ) -> Result<Vec<Patent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM patents WHERE {condition} \
             ORDER BY application_date DESC, id DESC"
        );
        let mut statement = sqlx::query_as::<_, PatentRow>(&query);
        if let Some(value) = value {
            statement = statement.bind(value);
        }
        let rows = statement.fetch_all(pool).await?;
        decode_all(rows)
    }
}
