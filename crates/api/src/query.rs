//! Query parameter types for list endpoints.
//!
//! Every parameter arrives as raw text. Boolean flags are true only for the
//! literal `true`, and `limit` is honoured only when it is a positive
//! integer. Enumerated filters with unknown values are rejected with 400.

use std::str::FromStr;

use labsite_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppError;

/// `GET /api/team-members?category=&search=`
#[derive(Debug, Default, Deserialize)]
pub struct TeamMemberParams {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// `GET /api/publications?year=&highlighted=&search=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct PublicationParams {
    pub year: Option<String>,
    pub highlighted: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
}

/// `GET /api/patents?status=&type=&highlighted=&search=`
#[derive(Debug, Default, Deserialize)]
pub struct PatentParams {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub patent_type: Option<String>,
    pub highlighted: Option<String>,
    pub search: Option<String>,
}

/// `GET /api/projects?isActive=&search=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    pub is_active: Option<String>,
    pub search: Option<String>,
}

/// `GET /api/news?published=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    pub published: Option<String>,
    pub limit: Option<String>,
}

/// `GET /api/research-*?active=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct ResearchParams {
    pub active: Option<String>,
    pub limit: Option<String>,
}

/// The parameter value, or `None` when absent or blank.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse an enumerated filter such as `category=student`.
pub fn parse_filter<T>(value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = CoreError>,
{
    value.parse().map_err(AppError::Core)
}

/// Parse an integer filter such as `year=2023`.
pub fn parse_year(value: &str) -> Result<i32, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Core(CoreError::invalid("year", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use labsite_core::team_member::MemberCategory;

    #[test]
    fn blank_values_are_absent() {
        assert_eq!(present(&Some("  ".into())), None);
        assert_eq!(present(&Some(" student ".into())), Some("student"));
        assert_eq!(present(&None), None);
    }

    #[test]
    fn unknown_enum_filter_is_rejected() {
        assert!(parse_filter::<MemberCategory>("student").is_ok());
        assert!(parse_filter::<MemberCategory>("janitor").is_err());
    }

    #[test]
    fn year_must_be_numeric() {
        assert_eq!(parse_year("2023").unwrap(), 2023);
        assert!(parse_year("recent").is_err());
    }
}
