use labsite_core::team_member::TeamMember;
use labsite_core::types::{Date, DbId};
use sqlx::FromRow;

use super::{flag, parse_text};

/// A row from the `team_members` table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberRow {
    pub id: DbId,
    pub name: String,
    pub title: String,
    pub degree: Option<String>,
    pub research: String,
    pub email: String,
    pub category: String,
    pub google_scholar: Option<String>,
    pub research_gate: Option<String>,
    pub orcid: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: i64,
    pub join_date: Date,
}

impl TryFrom<TeamMemberRow> for TeamMember {
    type Error = sqlx::Error;

    fn try_from(row: TeamMemberRow) -> Result<Self, Self::Error> {
        Ok(TeamMember {
            id: row.id,
            name: row.name,
            title: row.title,
            degree: row.degree,
            research: row.research,
            email: row.email,
            category: parse_text(&row.category)?,
            google_scholar: row.google_scholar,
            research_gate: row.research_gate,
            orcid: row.orcid,
            bio: row.bio,
            photo_url: row.photo_url,
            is_active: flag(row.is_active),
            join_date: row.join_date,
        })
    }
}
