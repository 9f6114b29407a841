//! Repository for the `publications` and `publication_keywords` tables.
//!
//! Keyword rows are always written in the same transaction as their
//! publication.

use std::collections::HashMap;

use chrono::Utc;
use labsite_core::publication::{CreatePublication, Publication, UpdatePublication};
use labsite_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::publication::{PublicationKeywordRow, PublicationRow};
use crate::models::to_flag;
use crate::DbPool;

/// Column list for `publications` queries.
const COLUMNS: &str = "\
    id, title, authors, journal, year, volume, issue, pages, doi, \
    abstract, pdf_url, citation_count, is_highlighted";

/// Provides CRUD operations for publications.
pub struct PublicationRepo;

impl PublicationRepo {
    /// List every publication, newest year first then by title.
    pub async fn list(pool: &DbPool) -> Result<Vec<Publication>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM publications ORDER BY year DESC, title, id");
        let rows = sqlx::query_as::<_, PublicationRow>(&query)
            .fetch_all(pool)
            .await?;
        Self::attach_keywords(pool, rows).await
    }

    pub async fn list_highlighted(pool: &DbPool) -> Result<Vec<Publication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM publications WHERE is_highlighted = 1 \
             ORDER BY year DESC, title, id"
        );
        let rows = sqlx::query_as::<_, PublicationRow>(&query)
            .fetch_all(pool)
            .await?;
        Self::attach_keywords(pool, rows).await
    }

    /// List the publications of one year ordered by title.
    pub async fn list_by_year(pool: &DbPool, year: i32) -> Result<Vec<Publication>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM publications WHERE year = $1 ORDER BY title, id");
        let rows = sqlx::query_as::<_, PublicationRow>(&query)
            .bind(year)
            .fetch_all(pool)
            .await?;
        Self::attach_keywords(pool, rows).await
    }

    /// Case-insensitive search over title, authors, journal, DOI, abstract
    /// and keywords.
    pub async fn search(pool: &DbPool, query: &str) -> Result<Vec<Publication>, sqlx::Error> {
        let mut publications = Self::list(pool).await?;
        publications.retain(|publication| publication.matches_query(query));
        Ok(publications)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Publication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publications WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, PublicationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let keywords: Vec<String> = sqlx::query_scalar(
            "SELECT keyword FROM publication_keywords \
             WHERE publication_id = $1 ORDER BY position, id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(Some(row.into_publication(keywords)))
    }

    /// Insert a publication and its keywords atomically.
    pub async fn create(
        pool: &DbPool,
        input: &CreatePublication,
    ) -> Result<Publication, sqlx::Error> {
        let draft = input.clone().into_publication(0);
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO publications (\
                title, authors, journal, year, volume, issue, pages, doi, \
                abstract, pdf_url, citation_count, is_highlighted, created_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13) \
             RETURNING id",
        )
        .bind(&draft.title)
        .bind(&draft.authors)
        .bind(&draft.journal)
        .bind(draft.year)
        .bind(draft.volume.as_deref())
        .bind(draft.issue.as_deref())
        .bind(draft.pages.as_deref())
        .bind(draft.doi.as_deref())
        .bind(draft.abstract_text.as_deref())
        .bind(draft.pdf_url.as_deref())
        .bind(draft.citation_count)
        .bind(to_flag(draft.is_highlighted))
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_keywords(&mut tx, id, &draft.keywords).await?;
        tx.commit().await?;

        Ok(Publication { id, ..draft })
    }

    /// Merge `patch` over the stored publication. Keyword rows are replaced
    /// only when the patch carries `keywords`.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: UpdatePublication,
    ) -> Result<Option<Publication>, sqlx::Error> {
        let Some(mut publication) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let replace_keywords = patch.keywords.is_some();
        publication.apply(patch);

        let mut tx = pool.begin().await?;
        let result = sqlx::query(
            "UPDATE publications SET \
                title = $1, authors = $2, journal = $3, year = $4, volume = $5, \
                issue = $6, pages = $7, doi = $8, abstract = $9, pdf_url = $10, \
                citation_count = $11, is_highlighted = $12, updated_at = $13 \
             WHERE id = $14",
        )
        .bind(&publication.title)
        .bind(&publication.authors)
        .bind(&publication.journal)
        .bind(publication.year)
        .bind(publication.volume.as_deref())
        .bind(publication.issue.as_deref())
        .bind(publication.pages.as_deref())
        .bind(publication.doi.as_deref())
        .bind(publication.abstract_text.as_deref())
        .bind(publication.pdf_url.as_deref())
        .bind(publication.citation_count)
        .bind(to_flag(publication.is_highlighted))
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if replace_keywords {
            sqlx::query("DELETE FROM publication_keywords WHERE publication_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_keywords(&mut tx, id, &publication.keywords).await?;
        }
        tx.commit().await?;

        Ok(Some(publication))
    }

    /// Delete a publication and its keywords. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM publication_keywords WHERE publication_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM publications WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM publications")
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Keywords
    // -----------------------------------------------------------------------

    async fn insert_keywords(
        conn: &mut SqliteConnection,
        publication_id: DbId,
        keywords: &[String],
    ) -> Result<(), sqlx::Error> {
        for (position, keyword) in keywords.iter().enumerate() {
            sqlx::query(
                "INSERT INTO publication_keywords (publication_id, keyword, position) \
                 VALUES ($1, $2, $3)",
            )
            .bind(publication_id)
            .bind(keyword)
            .bind(position as i64)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Load the keywords of every row in one query and attach them.
    async fn attach_keywords(
        pool: &DbPool,
        rows: Vec<PublicationRow>,
    ) -> Result<Vec<Publication>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let keyword_rows = sqlx::query_as::<_, PublicationKeywordRow>(
            "SELECT publication_id, keyword FROM publication_keywords \
             ORDER BY publication_id, position, id",
        )
        .fetch_all(pool)
        .await?;

        let mut by_publication: HashMap<DbId, Vec<String>> = HashMap::new();
        for row in keyword_rows {
            by_publication
                .entry(row.publication_id)
                .or_default()
                .push(row.keyword);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let keywords = by_publication.remove(&row.id).unwrap_or_default();
                row.into_publication(keywords)
            })
            .collect())
    }
}
