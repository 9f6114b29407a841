//! Row types mirroring table columns, plus their conversion into the domain
//! entities of `labsite_core`.
//!
//! SQLite has no boolean or enum columns, so flags are stored as 0/1
//! integers and enumerations as their wire text.

use std::str::FromStr;

use labsite_core::error::CoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod news;
pub mod patent;
pub mod project;
pub mod publication;
pub mod research_item;
pub mod team_member;
pub mod todo;
pub mod user;

pub(crate) fn flag(value: i64) -> bool {
    value != 0
}

pub(crate) fn to_flag(value: bool) -> i64 {
    i64::from(value)
}

/// Parse an enumeration column, surfacing bad text as a decode error.
pub(crate) fn parse_text<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = CoreError>,
{
    value
        .parse()
        .map_err(|err: CoreError| sqlx::Error::Decode(Box::new(err)))
}

/// Decode a JSON text column.
pub(crate) fn decode_json<T: DeserializeOwned>(value: &str) -> Result<T, sqlx::Error> {
    serde_json::from_str(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Encode a value for a JSON text column.
pub(crate) fn encode_json<T: Serialize>(value: &T) -> Result<String, sqlx::Error> {
    serde_json::to_string(value).map_err(|err| sqlx::Error::Encode(Box::new(err)))
}
