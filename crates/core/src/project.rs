//! Funded research project entity, DTOs and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::search::matches_any;
use crate::types::{Date, DbId};
use crate::validation::{
    merge, merge_nullable, merge_optional_text, nullable, optional_text, require_patch_text,
    require_text, Nullable,
};

/// A funded project. `leader` is free text, not a reference to a team member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: String,
    pub funding_amount: Option<f64>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub leader: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub funding_amount: Option<f64>,
    pub start_date: Date,
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub leader: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    pub source: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub funding_amount: Nullable<f64>,
    pub start_date: Option<Date>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub end_date: Nullable<Date>,
    pub leader: Option<String>,
    pub is_active: Option<bool>,
}

fn validate_funding(amount: Option<f64>) -> Result<(), CoreError> {
    match amount {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(CoreError::invalid("fundingAmount", value.to_string()))
        }
        _ => Ok(()),
    }
}

fn validate_period(start: Date, end: Option<Date>) -> Result<(), CoreError> {
    match end {
        Some(end) if end < start => Err(CoreError::Validation(format!(
            "endDate {end} precedes startDate {start}"
        ))),
        _ => Ok(()),
    }
}

impl CreateProject {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        validate_funding(self.funding_amount)?;
        validate_period(self.start_date, self.end_date)
    }

    pub fn into_project(self, id: DbId) -> Project {
        Project {
            id,
            name: self.name,
            description: optional_text(self.description),
            source: self.source.unwrap_or_default(),
            funding_amount: self.funding_amount,
            start_date: self.start_date,
            end_date: self.end_date,
            leader: self.leader.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

impl UpdateProject {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_patch_text("name", self.name.as_deref())?;
        validate_funding(self.funding_amount.flatten())
    }
}

impl Project {
    pub fn apply(&mut self, patch: UpdateProject) -> Result<(), CoreError> {
        merge(&mut self.name, patch.name);
        merge_optional_text(&mut self.description, patch.description);
        merge(&mut self.source, patch.source);
        merge_nullable(&mut self.funding_amount, patch.funding_amount);
        merge(&mut self.start_date, patch.start_date);
        merge_nullable(&mut self.end_date, patch.end_date);
        merge(&mut self.leader, patch.leader);
        merge(&mut self.is_active, patch.is_active);
        validate_period(self.start_date, self.end_date)
    }

    /// Free-text match over name, description, funding source and leader.
    pub fn matches_query(&self, query: &str) -> bool {
        let fields = [
            Some(self.name.as_str()),
            self.description.as_deref(),
            Some(self.source.as_str()),
            Some(self.leader.as_str()),
        ];
        matches_any(fields.into_iter().flatten(), query)
    }
}
