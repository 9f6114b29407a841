use labsite_core::patent::Patent;
use labsite_core::types::{Date, DbId};
use sqlx::FromRow;

use super::{decode_json, flag, parse_text};

/// A row from the `patents` table. `inventor_ids` and `keywords` hold JSON
/// arrays.
#[derive(Debug, Clone, FromRow)]
pub struct PatentRow {
    pub id: DbId,
    pub title: String,
    pub inventors: String,
    pub inventor_ids: Option<String>,
    pub patent_number: String,
    pub application_date: Date,
    pub grant_date: Option<Date>,
    #[sqlx(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub keywords: String,
    pub status: String,
    pub patent_type: String,
    pub pdf_url: Option<String>,
    pub is_highlighted: i64,
}

impl TryFrom<PatentRow> for Patent {
    type Error = sqlx::Error;

    fn try_from(row: PatentRow) -> Result<Self, Self::Error> {
        let inventor_ids = row
            .inventor_ids
            .as_deref()
            .map(decode_json::<Vec<DbId>>)
            .transpose()?;
        Ok(Patent {
            id: row.id,
            title: row.title,
            inventors: row.inventors,
            inventor_ids,
            patent_number: row.patent_number,
            application_date: row.application_date,
            grant_date: row.grant_date,
            abstract_text: row.abstract_text,
            keywords: decode_json(&row.keywords)?,
            status: parse_text(&row.status)?,
            patent_type: parse_text(&row.patent_type)?,
            pdf_url: row.pdf_url,
            is_highlighted: flag(row.is_highlighted),
        })
    }
}
