//! News item entity, DTOs and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId};
use crate::validation::{
    merge, merge_optional_text, nullable, optional_text, require_patch_text, require_text, Nullable,
};

/// A news post. `publish_date` keeps its snake_case wire name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub content: String,
    #[serde(rename = "publish_date", alias = "publishDate")]
    pub publish_date: Date,
    pub author: String,
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNews {
    pub title: String,
    pub content: String,
    #[serde(rename = "publish_date", alias = "publishDate")]
    pub publish_date: Date,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNews {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "publish_date", alias = "publishDate")]
    pub publish_date: Option<Date>,
    pub author: Option<String>,
    pub is_published: Option<bool>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub image_url: Nullable<String>,
}

/// Number of news items the dashboard shows.
pub const RECENT_NEWS_COUNT: usize = 4;

impl CreateNews {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)
    }

    pub fn into_news(self, id: DbId) -> News {
        News {
            id,
            title: self.title,
            content: self.content,
            publish_date: self.publish_date,
            author: self.author.unwrap_or_default(),
            is_published: self.is_published.unwrap_or(true),
            image_url: optional_text(self.image_url),
        }
    }
}

impl UpdateNews {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_patch_text("title", self.title.as_deref())?;
        require_patch_text("content", self.content.as_deref())
    }
}

impl News {
    pub fn apply(&mut self, patch: UpdateNews) {
        merge(&mut self.title, patch.title);
        merge(&mut self.content, patch.content);
        merge(&mut self.publish_date, patch.publish_date);
        merge(&mut self.author, patch.author);
        merge(&mut self.is_published, patch.is_published);
        merge_optional_text(&mut self.image_url, patch.image_url);
    }
}
