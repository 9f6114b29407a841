//! Repository for the `projects` table.

use chrono::Utc;
use labsite_core::project::{CreateProject, Project, UpdateProject};
use labsite_core::types::DbId;

use crate::models::project::ProjectRow;
use crate::models::to_flag;
use crate::{DbPool, StoreError};

/// Column list for `projects` queries.
const COLUMNS: &str = "\
    id, name, description, funding_source, funding_amount, \
    start_date, end_date, leader, is_active";

/// Provides CRUD operations for research projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List every project, latest start date first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY start_date DESC, id DESC");
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// List active (`true`) or finished (`false`) projects.
    pub async fn list_by_status(
        pool: &DbPool,
        is_active: bool,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE is_active = $1 \
             ORDER BY start_date DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(to_flag(is_active))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Case-insensitive search over name, description, funding source and
    /// leader.
    pub async fn search(pool: &DbPool, query: &str) -> Result<Vec<Project>, sqlx::Error> {
        let mut projects = Self::list(pool).await?;
        projects.retain(|project| project.matches_query(query));
        Ok(projects)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Project::from))
    }

    pub async fn create(pool: &DbPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let draft = input.clone().into_project(0);
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO projects (\
                name, description, funding_source, funding_amount, start_date, \
                end_date, leader, is_active, created_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) \
             RETURNING id",
        )
        .bind(&draft.name)
        .bind(draft.description.as_deref())
        .bind(&draft.source)
        .bind(draft.funding_amount)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(&draft.leader)
        .bind(to_flag(draft.is_active))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Project { id, ..draft })
    }

    /// Merge `patch` over the stored project. Fails with a validation error
    /// when the merged period ends before it starts.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: UpdateProject,
    ) -> Result<Option<Project>, StoreError> {
        let Some(mut project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        project.apply(patch)?;

        let result = sqlx::query(
            "UPDATE projects SET \
                name = $1, description = $2, funding_source = $3, funding_amount = $4, \
                start_date = $5, end_date = $6, leader = $7, is_active = $8, \
                updated_at = $9 \
             WHERE id = $10",
        )
        .bind(&project.name)
        .bind(project.description.as_deref())
        .bind(&project.source)
        .bind(project.funding_amount)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(&project.leader)
        .bind(to_flag(project.is_active))
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Ok((result.rows_affected() > 0).then_some(project))
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await
    }
}
