//! Publication entity, DTOs and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::search::matches_any;
use crate::types::DbId;
use crate::validation::{
    merge, merge_optional_text, nullable, optional_text, require_patch_text, require_text, Nullable,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: DbId,
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub citation_count: i64,
    pub is_highlighted: bool,
}

/// DTO for creating a publication. `citationCount` defaults to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublication {
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub year: i32,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub citation_count: Option<i64>,
    #[serde(default)]
    pub is_highlighted: Option<bool>,
}

/// Patch for a publication. `keywords`, when present, replaces the whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePublication {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub volume: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub issue: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub pages: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub doi: Nullable<String>,
    #[serde(default, rename = "abstract", deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub pdf_url: Nullable<String>,
    pub keywords: Option<Vec<String>>,
    pub citation_count: Option<i64>,
    pub is_highlighted: Option<bool>,
}

fn validate_year(year: i32) -> Result<(), CoreError> {
    if year < 1 {
        return Err(CoreError::MissingField("year"));
    }
    Ok(())
}

fn validate_citations(count: i64) -> Result<(), CoreError> {
    if count < 0 {
        return Err(CoreError::invalid("citationCount", count.to_string()));
    }
    Ok(())
}

/// Trim keywords and drop blanks.
pub fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

impl CreatePublication {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require_text("authors", &self.authors)?;
        require_text("journal", &self.journal)?;
        validate_year(self.year)?;
        if let Some(count) = self.citation_count {
            validate_citations(count)?;
        }
        Ok(())
    }

    pub fn into_publication(self, id: DbId) -> Publication {
        Publication {
            id,
            title: self.title,
            authors: self.authors,
            journal: self.journal,
            year: self.year,
            volume: optional_text(self.volume),
            issue: optional_text(self.issue),
            pages: optional_text(self.pages),
            doi: optional_text(self.doi),
            abstract_text: optional_text(self.abstract_text),
            pdf_url: optional_text(self.pdf_url),
            keywords: normalize_keywords(self.keywords),
            citation_count: self.citation_count.unwrap_or(0),
            is_highlighted: self.is_highlighted.unwrap_or(true),
        }
    }
}

impl UpdatePublication {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_patch_text("title", self.title.as_deref())?;
        require_patch_text("authors", self.authors.as_deref())?;
        require_patch_text("journal", self.journal.as_deref())?;
        if let Some(year) = self.year {
            validate_year(year)?;
        }
        if let Some(count) = self.citation_count {
            validate_citations(count)?;
        }
        Ok(())
    }
}

impl Publication {
    pub fn apply(&mut self, patch: UpdatePublication) {
        merge(&mut self.title, patch.title);
        merge(&mut self.authors, patch.authors);
        merge(&mut self.journal, patch.journal);
        merge(&mut self.year, patch.year);
        merge_optional_text(&mut self.volume, patch.volume);
        merge_optional_text(&mut self.issue, patch.issue);
        merge_optional_text(&mut self.pages, patch.pages);
        merge_optional_text(&mut self.doi, patch.doi);
        merge_optional_text(&mut self.abstract_text, patch.abstract_text);
        merge_optional_text(&mut self.pdf_url, patch.pdf_url);
        merge(&mut self.keywords, patch.keywords.map(normalize_keywords));
        merge(&mut self.citation_count, patch.citation_count);
        merge(&mut self.is_highlighted, patch.is_highlighted);
    }

    /// Free-text match over title, authors, journal, doi, abstract and keywords.
    pub fn matches_query(&self, query: &str) -> bool {
        let fields = [
            Some(self.title.as_str()),
            Some(self.authors.as_str()),
            Some(self.journal.as_str()),
            self.doi.as_deref(),
            self.abstract_text.as_deref(),
        ];
        matches_any(
            fields
                .into_iter()
                .flatten()
                .chain(self.keywords.iter().map(String::as_str)),
            query,
        )
    }
}
