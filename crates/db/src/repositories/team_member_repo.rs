//! Repository for the `team_members` table.

use chrono::Utc;
use labsite_core::team_member::{CreateTeamMember, MemberCategory, TeamMember, UpdateTeamMember};
use labsite_core::types::DbId;

use super::decode_all;
use crate::models::team_member::TeamMemberRow;
use crate::models::to_flag;
use crate::DbPool;

/// Column list for `team_members` queries.
const COLUMNS: &str = "\
    id, name, title, degree, research, email, category, \
    google_scholar, research_gate, orcid, bio, photo_url, \
    is_active, join_date";

/// Provides CRUD operations for lab members.
pub struct TeamMemberRepo;

impl TeamMemberRepo {
    /// List every member ordered by name.
    pub async fn list(pool: &DbPool) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members ORDER BY name, id");
        let rows = sqlx::query_as::<_, TeamMemberRow>(&query)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// List the members of one category ordered by name.
    pub async fn list_by_category(
        pool: &DbPool,
        category: MemberCategory,
    ) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM team_members WHERE category = $1 ORDER BY name, id");
        let rows = sqlx::query_as::<_, TeamMemberRow>(&query)
            .bind(category.as_str())
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Case-insensitive substring search over name, title, research and email.
    pub async fn search(pool: &DbPool, query: &str) -> Result<Vec<TeamMember>, sqlx::Error> {
        let mut members = Self::list(pool).await?;
        members.retain(|member| member.matches_query(query));
        Ok(members)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members WHERE id = $1");
        sqlx::query_as::<_, TeamMemberRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(TeamMember::try_from)
            .transpose()
    }

    /// Insert a member. `joinDate` defaults to today (UTC).
    pub async fn create(
        pool: &DbPool,
        input: &CreateTeamMember,
    ) -> Result<TeamMember, sqlx::Error> {
        let now = Utc::now();
        let draft = input.clone().into_member(0, now.date_naive());
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO team_members (\
                name, title, degree, research, email, category, \
                google_scholar, research_gate, orcid, bio, photo_url, \
                is_active, join_date, created_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14) \
             RETURNING id",
        )
        .bind(&draft.name)
        .bind(&draft.title)
        .bind(draft.degree.as_deref())
        .bind(&draft.research)
        .bind(&draft.email)
        .bind(draft.category.as_str())
        .bind(draft.google_scholar.as_deref())
        .bind(draft.research_gate.as_deref())
        .bind(draft.orcid.as_deref())
        .bind(draft.bio.as_deref())
        .bind(draft.photo_url.as_deref())
        .bind(to_flag(draft.is_active))
        .bind(draft.join_date)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(TeamMember { id, ..draft })
    }

    /// Merge `patch` over the stored member and write every column back.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        patch: UpdateTeamMember,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let Some(mut member) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        member.apply(patch);

        let result = sqlx::query(
            "UPDATE team_members SET \
                name = $1, title = $2, degree = $3, research = $4, email = $5, \
                category = $6, google_scholar = $7, research_gate = $8, orcid = $9, \
                bio = $10, photo_url = $11, is_active = $12, join_date = $13, \
                updated_at = $14 \
             WHERE id = $15",
        )
        .bind(&member.name)
        .bind(&member.title)
        .bind(member.degree.as_deref())
        .bind(&member.research)
        .bind(&member.email)
        .bind(member.category.as_str())
        .bind(member.google_scholar.as_deref())
        .bind(member.research_gate.as_deref())
        .bind(member.orcid.as_deref())
        .bind(member.bio.as_deref())
        .bind(member.photo_url.as_deref())
        .bind(to_flag(member.is_active))
        .bind(member.join_date)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Ok((result.rows_affected() > 0).then_some(member))
    }

    /// Delete a member. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM team_members")
            .fetch_one(pool)
            .await
    }
}
