use labsite_core::publication::Publication;
use labsite_core::types::DbId;
use sqlx::FromRow;

use super::flag;

/// A row from the `publications` table. Keywords live in
/// `publication_keywords` and are attached separately.
#[derive(Debug, Clone, FromRow)]
pub struct PublicationRow {
    pub id: DbId,
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub year: i32,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
    pub doi: Option<String>,
    #[sqlx(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub pdf_url: Option<String>,
    pub citation_count: i64,
    pub is_highlighted: i64,
}

/// A row from the `publication_keywords` table.
#[derive(Debug, Clone, FromRow)]
pub struct PublicationKeywordRow {
    pub publication_id: DbId,
    pub keyword: String,
}

impl PublicationRow {
    pub fn into_publication(self, keywords: Vec<String>) -> Publication {
        Publication {
            id: self.id,
            title: self.title,
            authors: self.authors,
            journal: self.journal,
            year: self.year,
            volume: self.volume,
            issue: self.issue,
            pages: self.pages,
            doi: self.doi,
            abstract_text: self.abstract_text,
            pdf_url: self.pdf_url,
            keywords,
            citation_count: self.citation_count,
            is_highlighted: flag(self.is_highlighted),
        }
    }
}
