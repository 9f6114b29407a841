//! Research areas, directions and features.
//!
//! The three kinds share one item shape and one set of ordering rules; they
//! differ only in which fields are required and how they are persisted.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ordering::{normalize_update_order, Ordered};
use crate::types::{DbId, Timestamp};
use crate::validation::{
    merge, merge_optional_text, nullable, optional_text, require_patch_text, require_text, Nullable,
};

crate::text_enum! {
    /// Which research listing an item belongs to.
    pub enum ResearchKind("kind") {
        Area => "area",
        Direction => "direction",
        Feature => "feature",
    }
}

impl ResearchKind {
    /// Entity name used in not-found messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            ResearchKind::Area => "ResearchArea",
            ResearchKind::Direction => "ResearchDirection",
            ResearchKind::Feature => "ResearchFeature",
        }
    }

    /// Key holding the item array inside the JSON document.
    pub fn document_key(self) -> &'static str {
        match self {
            ResearchKind::Area => "researchAreas",
            ResearchKind::Direction => "researchDirections",
            ResearchKind::Feature => "researchFeatures",
        }
    }

    /// File name of the JSON document inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ResearchKind::Area => "researchAreas.json",
            ResearchKind::Direction => "researchDirections.json",
            ResearchKind::Feature => "researchFeatures.json",
        }
    }

    /// Collection path segment under `/api`.
    pub fn route_segment(self) -> &'static str {
        match self {
            ResearchKind::Area => "research-areas",
            ResearchKind::Direction => "research-directions",
            ResearchKind::Feature => "research-features",
        }
    }

    /// Directions may omit their description; areas and features may not.
    pub fn requires_description(self) -> bool {
        !matches!(self, ResearchKind::Direction)
    }

    /// Link given to a new area that was created without one.
    pub fn default_link(self, id: DbId) -> Option<String> {
        match self {
            ResearchKind::Area => Some(format!("/main/research#{id}")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchItem {
    pub id: DbId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub order: i64,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Ordered for ResearchItem {
    fn id(&self) -> DbId {
        self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResearchItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Missing or non-positive values append the item at the end.
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResearchItem {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub link: Nullable<String>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

impl CreateResearchItem {
    pub fn validate(&self, kind: ResearchKind) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        if kind.requires_description() {
            require_text("description", self.description.as_deref().unwrap_or(""))?;
        }
        Ok(())
    }

    /// Build the stored item. `order` must already be normalised.
    pub fn into_item(self, kind: ResearchKind, id: DbId, order: i64, now: Timestamp) -> ResearchItem {
        ResearchItem {
            id,
            title: self.title,
            description: optional_text(self.description),
            link: optional_text(self.link).or_else(|| kind.default_link(id)),
            order,
            is_active: self.is_active.unwrap_or(true),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

impl UpdateResearchItem {
    pub fn validate(&self, kind: ResearchKind) -> Result<(), CoreError> {
        require_patch_text("title", self.title.as_deref())?;
        if kind.requires_description() {
            let description = self.description.as_ref().map(|d| d.as_deref().unwrap_or(""));
            require_patch_text("description", description)?;
        }
        Ok(())
    }
}

impl ResearchItem {
    /// Shallow-merge `patch`, clamp the order to >= 1 and refresh `updatedAt`.
    pub fn apply(&mut self, patch: UpdateResearchItem, now: Timestamp) {
        merge(&mut self.title, patch.title);
        merge_optional_text(&mut self.description, patch.description);
        merge_optional_text(&mut self.link, patch.link);
        merge(&mut self.order, patch.order);
        merge(&mut self.is_active, patch.is_active);
        self.order = normalize_update_order(self.order);
        self.updated_at = Some(now);
    }
}
