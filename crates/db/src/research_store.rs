//! Backend-agnostic storage for research areas, directions and features.
//!
//! Handlers only ever see `Arc<dyn ResearchStore>`; which backend sits
//! behind it is decided once from configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use labsite_core::research::{CreateResearchItem, ResearchItem, ResearchKind, UpdateResearchItem};
use labsite_core::types::DbId;

use crate::documents::DocumentResearchStore;
use crate::repositories::SqliteResearchStore;
use crate::{DbPool, StoreError};

/// Ordered listings of research items, one listing per [`ResearchKind`].
///
/// Implementations keep every `order` >= 1. `create` appends when the
/// requested order is missing or non-positive; `delete` renumbers the
/// survivors to `1..=N`.
#[async_trait]
pub trait ResearchStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Every item of `kind` sorted by order, ties broken by id.
    async fn list(&self, kind: ResearchKind) -> Result<Vec<ResearchItem>, StoreError>;

    async fn find_by_id(
        &self,
        kind: ResearchKind,
        id: DbId,
    ) -> Result<Option<ResearchItem>, StoreError>;

    /// Insert an already validated item.
    async fn create(
        &self,
        kind: ResearchKind,
        input: &CreateResearchItem,
    ) -> Result<ResearchItem, StoreError>;

    /// Merge an already validated patch. `None` when the id is unknown.
    async fn update(
        &self,
        kind: ResearchKind,
        id: DbId,
        patch: UpdateResearchItem,
    ) -> Result<Option<ResearchItem>, StoreError>;

    /// Remove an item and renumber the rest. `false` when the id is unknown.
    async fn delete(&self, kind: ResearchKind, id: DbId) -> Result<bool, StoreError>;
}

/// Which [`ResearchStore`] implementation to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchBackend {
    /// One JSON document per kind inside the data directory.
    Document,
    /// The `research_items` table of the main database.
    Sqlite,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown research store backend '{0}' (expected 'document' or 'sqlite')")]
pub struct UnknownBackend(pub String);

impl FromStr for ResearchBackend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "json" => Ok(ResearchBackend::Document),
            "sqlite" | "database" => Ok(ResearchBackend::Sqlite),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}

/// Construct the configured backend.
pub fn open_research_store(
    backend: ResearchBackend,
    pool: &DbPool,
    data_dir: &Path,
) -> Arc<dyn ResearchStore> {
    match backend {
        ResearchBackend::Document => Arc::new(DocumentResearchStore::new(data_dir)),
        ResearchBackend::Sqlite => Arc::new(SqliteResearchStore::new(pool.clone())),
    }
}
