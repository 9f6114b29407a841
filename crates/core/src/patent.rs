//! Patent entity, DTOs and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::search::matches_any;
use crate::types::{Date, DbId};
use crate::validation::{
    merge, merge_nullable, merge_optional_text, nullable, optional_text, require_patch_text,
    require_text, Nullable,
};

crate::text_enum! {
    /// Prosecution state of a patent.
    pub enum PatentStatus("status") {
        Pending => "pending",
        Granted => "granted",
        Expired => "expired",
    }
}

crate::text_enum! {
    /// Patent kind.
    pub enum PatentType("type") {
        Invention => "invention",
        Utility => "utility",
        Design => "design",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patent {
    pub id: DbId,
    pub title: String,
    pub inventors: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventor_ids: Option<Vec<DbId>>,
    pub patent_number: String,
    pub application_date: Date,
    pub grant_date: Option<Date>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub status: PatentStatus,
    #[serde(rename = "type")]
    pub patent_type: PatentType,
    pub pdf_url: Option<String>,
    pub is_highlighted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatent {
    pub title: String,
    pub inventors: String,
    #[serde(default)]
    pub inventor_ids: Option<Vec<DbId>>,
    pub patent_number: String,
    pub application_date: Date,
    #[serde(default)]
    pub grant_date: Option<Date>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub status: PatentStatus,
    #[serde(rename = "type")]
    pub patent_type: PatentType,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub is_highlighted: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatent {
    pub title: Option<String>,
    pub inventors: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub inventor_ids: Nullable<Vec<DbId>>,
    pub patent_number: Option<String>,
    pub application_date: Option<Date>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub grant_date: Nullable<Date>,
    #[serde(default, rename = "abstract", deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Nullable<String>,
    pub keywords: Option<Vec<String>>,
    pub status: Option<PatentStatus>,
    #[serde(rename = "type")]
    pub patent_type: Option<PatentType>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub pdf_url: Nullable<String>,
    pub is_highlighted: Option<bool>,
}

fn validate_dates(application: Date, grant: Option<Date>) -> Result<(), CoreError> {
    match grant {
        Some(grant) if grant < application => Err(CoreError::Validation(format!(
            "grantDate {grant} precedes applicationDate {application}"
        ))),
        _ => Ok(()),
    }
}

impl CreatePatent {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require_text("inventors", &self.inventors)?;
        require_text("patentNumber", &self.patent_number)?;
        validate_dates(self.application_date, self.grant_date)
    }

    pub fn into_patent(self, id: DbId) -> Patent {
        Patent {
            id,
            title: self.title,
            inventors: self.inventors,
            inventor_ids: self.inventor_ids,
            patent_number: self.patent_number,
            application_date: self.application_date,
            grant_date: self.grant_date,
            abstract_text: optional_text(self.abstract_text),
            keywords: crate::publication::normalize_keywords(self.keywords),
            status: self.status,
            patent_type: self.patent_type,
            pdf_url: optional_text(self.pdf_url),
            is_highlighted: self.is_highlighted.unwrap_or(true),
        }
    }
}

impl UpdatePatent {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_patch_text("title", self.title.as_deref())?;
        require_patch_text("inventors", self.inventors.as_deref())?;
        require_patch_text("patentNumber", self.patent_number.as_deref())?;
        Ok(())
    }
}

impl Patent {
    /// Merge a validated patch. The resulting date pair is re-checked because
    /// either side may come from the stored record.
    pub fn apply(&mut self, patch: UpdatePatent) -> Result<(), CoreError> {
        merge(&mut self.title, patch.title);
        merge(&mut self.inventors, patch.inventors);
        merge_nullable(&mut self.inventor_ids, patch.inventor_ids);
        merge(&mut self.patent_number, patch.patent_number);
        merge(&mut self.application_date, patch.application_date);
        merge_nullable(&mut self.grant_date, patch.grant_date);
        merge_optional_text(&mut self.abstract_text, patch.abstract_text);
        merge(
            &mut self.keywords,
            patch.keywords.map(crate::publication::normalize_keywords),
        );
        merge(&mut self.status, patch.status);
        merge(&mut self.patent_type, patch.patent_type);
        merge_optional_text(&mut self.pdf_url, patch.pdf_url);
        merge(&mut self.is_highlighted, patch.is_highlighted);
        validate_dates(self.application_date, self.grant_date)
    }

    /// Free-text match over title, inventors, patent number and abstract.
    pub fn matches_query(&self, query: &str) -> bool {
        let fields = [
            Some(self.title.as_str()),
            Some(self.inventors.as_str()),
            Some(self.patent_number.as_str()),
            self.abstract_text.as_deref(),
        ];
        matches_any(fields.into_iter().flatten(), query)
    }
}
