//! Team roster entity, DTOs and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::search::matches_any;
use crate::types::{Date, DbId};
use crate::validation::{
    merge, merge_optional_text, nullable, optional_text, require_patch_text, require_text, Nullable,
};

crate::text_enum! {
    /// Roster group a member belongs to.
    pub enum MemberCategory("category") {
        Professor => "professor",
        Associate => "associate",
        Postdoc => "postdoc",
        Student => "student",
    }
}

impl MemberCategory {
    /// Position of the group on the roster page (professors first).
    pub fn rank(self) -> u8 {
        match self {
            MemberCategory::Professor => 0,
            MemberCategory::Associate => 1,
            MemberCategory::Postdoc => 2,
            MemberCategory::Student => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: DbId,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    pub research: String,
    pub email: String,
    pub category: MemberCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_scholar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_gate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub join_date: Date,
}

/// DTO for creating a team member. `joinDate` defaults to today.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMember {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub degree: Option<String>,
    pub research: String,
    pub email: String,
    pub category: MemberCategory,
    #[serde(default)]
    pub google_scholar: Option<String>,
    #[serde(default)]
    pub research_gate: Option<String>,
    #[serde(default)]
    pub orcid: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub join_date: Option<Date>,
}

/// Patch for a team member. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamMember {
    pub name: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub degree: Nullable<String>,
    pub research: Option<String>,
    pub email: Option<String>,
    pub category: Option<MemberCategory>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub google_scholar: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub research_gate: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub orcid: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub bio: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub photo_url: Nullable<String>,
    pub is_active: Option<bool>,
    pub join_date: Option<Date>,
}

impl CreateTeamMember {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        require_text("title", &self.title)?;
        require_text("research", &self.research)?;
        require_text("email", &self.email)?;
        Ok(())
    }

    /// Build the entity this DTO describes once the store has assigned `id`.
    pub fn into_member(self, id: DbId, today: Date) -> TeamMember {
        TeamMember {
            id,
            name: self.name,
            title: self.title,
            degree: optional_text(self.degree),
            research: self.research,
            email: self.email,
            category: self.category,
            google_scholar: optional_text(self.google_scholar),
            research_gate: optional_text(self.research_gate),
            orcid: optional_text(self.orcid),
            bio: optional_text(self.bio),
            photo_url: optional_text(self.photo_url),
            is_active: self.is_active.unwrap_or(true),
            join_date: self.join_date.unwrap_or(today),
        }
    }
}

impl UpdateTeamMember {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_patch_text("name", self.name.as_deref())?;
        require_patch_text("title", self.title.as_deref())?;
        require_patch_text("research", self.research.as_deref())?;
        require_patch_text("email", self.email.as_deref())?;
        Ok(())
    }
}

impl TeamMember {
    /// Shallow-merge `patch` over this member. `id` is never touched.
    pub fn apply(&mut self, patch: UpdateTeamMember) {
        merge(&mut self.name, patch.name);
        merge(&mut self.title, patch.title);
        merge_optional_text(&mut self.degree, patch.degree);
        merge(&mut self.research, patch.research);
        merge(&mut self.email, patch.email);
        merge(&mut self.category, patch.category);
        merge_optional_text(&mut self.google_scholar, patch.google_scholar);
        merge_optional_text(&mut self.research_gate, patch.research_gate);
        merge_optional_text(&mut self.orcid, patch.orcid);
        merge_optional_text(&mut self.bio, patch.bio);
        merge_optional_text(&mut self.photo_url, patch.photo_url);
        merge(&mut self.is_active, patch.is_active);
        merge(&mut self.join_date, patch.join_date);
    }

    /// Free-text match over name, title, research and email.
    pub fn matches_query(&self, query: &str) -> bool {
        matches_any(
            [
                self.name.as_str(),
                self.title.as_str(),
                self.research.as_str(),
                self.email.as_str(),
            ],
            query,
        )
    }
}

/// Order a roster by category rank, then by name.
pub fn sort_roster(members: &mut [TeamMember]) {
    members.sort_by(|a, b| {
        a.category
            .rank()
            .cmp(&b.category.rank())
            .then_with(|| a.name.cmp(&b.name))
    });
}
