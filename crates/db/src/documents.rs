//! JSON document backend for research listings.
//!
//! Each kind lives in its own file, e.g. `researchAreas.json`:
//!
//! ```json
//! { "researchAreas": [ { "id": 1, "title": "...", "order": 1, ... } ], "nextId": 2 }
//! ```
//!
//! A missing file reads as an empty listing. Writes go to a temporary file
//! that is renamed over the document, and are serialised by one async mutex
//! per store so read-modify-write cycles never interleave.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use labsite_core::ordering::{normalize_create_order, renumber, sort_by_order};
use labsite_core::research::{CreateResearchItem, ResearchItem, ResearchKind, UpdateResearchItem};
use labsite_core::types::DbId;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::research_store::ResearchStore;
use crate::StoreError;

/// Key holding the id counter beside the item array.
const NEXT_ID_KEY: &str = "nextId";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document {path} has no `{key}` item array")]
    Shape { path: PathBuf, key: &'static str },
}

impl DocumentError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        DocumentError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        DocumentError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The decoded contents of one document.
#[derive(Debug, Default)]
struct ResearchDocument {
    items: Vec<ResearchItem>,
    next_id: DbId,
}

impl ResearchDocument {
    fn parse(kind: ResearchKind, path: &Path, bytes: &[u8]) -> Result<Self, DocumentError> {
        let mut value: Value =
            serde_json::from_slice(bytes).map_err(|err| DocumentError::json(path, err))?;

        let items_value = match &mut value {
            // Bare arrays predate the id counter.
            Value::Array(items) => {
                tracing::warn!(path = %path.display(), "Reading legacy bare-array document");
                Some(Value::Array(std::mem::take(items)))
            }
            Value::Object(map) => map.remove(kind.document_key()),
            _ => None,
        }
        .ok_or_else(|| DocumentError::Shape {
            path: path.to_path_buf(),
            key: kind.document_key(),
        })?;
        let items: Vec<ResearchItem> =
            serde_json::from_value(items_value).map_err(|err| DocumentError::json(path, err))?;

        let stored_next = value
            .get(NEXT_ID_KEY)
            .and_then(Value::as_i64)
            .unwrap_or(0);
        let after_max = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;

        Ok(ResearchDocument {
            items,
            next_id: stored_next.max(after_max),
        })
    }

    fn to_json(&self, kind: ResearchKind) -> Result<Value, serde_json::Error> {
        let mut map = Map::new();
        map.insert(kind.document_key().to_string(), serde_json::to_value(&self.items)?);
        map.insert(NEXT_ID_KEY.to_string(), Value::from(self.next_id));
        Ok(Value::Object(map))
    }

    /// Hand out the next id. Ids are never reused, even after deletes.
    fn allocate_id(&mut self) -> DbId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}

/// [`ResearchStore`] over JSON files in a data directory.
pub struct DocumentResearchStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl DocumentResearchStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self, kind: ResearchKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    async fn load(&self, kind: ResearchKind) -> Result<ResearchDocument, DocumentError> {
        let path = self.path(kind);
        match tokio::fs::read(&path).await {
            Ok(bytes) => ResearchDocument::parse(kind, &path, &bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(ResearchDocument {
                items: Vec::new(),
                next_id: 1,
            }),
            Err(err) => Err(DocumentError::io(&path, err)),
        }
    }

    async fn save(&self, kind: ResearchKind, document: &ResearchDocument) -> Result<(), DocumentError> {
        let path = self.path(kind);
        let bytes = document
            .to_json(kind)
            .and_then(|value| serde_json::to_vec_pretty(&value))
            .map_err(|err| DocumentError::json(&path, err))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| DocumentError::io(&self.dir, err))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|err| DocumentError::io(&tmp, err))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|err| DocumentError::io(&path, err))?;

        tracing::debug!(path = %path.display(), items = document.items.len(), "Document written");
        Ok(())
    }
}

#[async_trait]
impl ResearchStore for DocumentResearchStore {
    fn backend(&self) -> &'static str {
        "document"
    }

    async fn list(&self, kind: ResearchKind) -> Result<Vec<ResearchItem>, StoreError> {
        let mut items = self.load(kind).await?.items;
        sort_by_order(&mut items);
        Ok(items)
    }

    async fn find_by_id(
        &self,
        kind: ResearchKind,
        id: DbId,
    ) -> Result<Option<ResearchItem>, StoreError> {
        let document = self.load(kind).await?;
        Ok(document.items.into_iter().find(|item| item.id == id))
    }

    async fn create(
        &self,
        kind: ResearchKind,
        input: &CreateResearchItem,
    ) -> Result<ResearchItem, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load(kind).await?;

        let order = normalize_create_order(input.order, &document.items);
        let id = document.allocate_id();
        let item = input.clone().into_item(kind, id, order, Utc::now());
        document.items.push(item.clone());

        self.save(kind, &document).await?;
        Ok(item)
    }

    async fn update(
        &self,
        kind: ResearchKind,
        id: DbId,
        patch: UpdateResearchItem,
    ) -> Result<Option<ResearchItem>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load(kind).await?;

        let Some(item) = document.items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        item.apply(patch, Utc::now());
        let updated = item.clone();

        self.save(kind, &document).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, kind: ResearchKind, id: DbId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load(kind).await?;

        let Some(index) = document.items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };
        document.items.remove(index);
        let renumbered = renumber(&mut document.items);

        self.save(kind, &document).await?;
        tracing::debug!(kind = %kind, id, renumbered = renumbered.len(), "Research item removed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn next_id_never_falls_behind_existing_ids() {
        let path = Path::new("researchAreas.json");
        let raw = br#"{"researchAreas":[{"id":7,"title":"A","order":1,"isActive":true}],"nextId":3}"#;
        let mut document = ResearchDocument::parse(ResearchKind::Area, path, raw).unwrap();
        assert_eq!(document.allocate_id(), 8);
        assert_eq!(document.allocate_id(), 9);
    }

    #[test]
    fn bare_arrays_are_accepted() {
        let path = Path::new("researchFeatures.json");
        let raw = br#"[{"id":2,"title":"F","description":"d","order":1,"isActive":false}]"#;
        let document = ResearchDocument::parse(ResearchKind::Feature, path, raw).unwrap();
        assert_eq!(document.items.len(), 1);
        assert_eq!(document.next_id, 3);
    }

    #[test]
    fn malformed_documents_are_reported() {
        let path = Path::new("researchDirections.json");
        let err = ResearchDocument::parse(ResearchKind::Direction, path, b"{not json").unwrap_err();
        assert_matches!(err, DocumentError::Json { .. });
    }

    #[test]
    fn document_under_another_key_is_a_shape_error() {
        let path = Path::new("researchDirections.json");
        let raw = br#"{"researchAreas":[],"nextId":2}"#;
        let err = ResearchDocument::parse(ResearchKind::Direction, path, raw).unwrap_err();
        assert_matches!(err, DocumentError::Shape { key: "researchDirections", .. });

        let err = ResearchDocument::parse(ResearchKind::Direction, path, b"\"text\"").unwrap_err();
        assert_matches!(err, DocumentError::Shape { .. });
    }

    #[test]
    fn serialised_document_uses_kind_key() {
        let document = ResearchDocument {
            items: Vec::new(),
            next_id: 4,
        };
        let value = document.to_json(ResearchKind::Direction).unwrap();
        assert_eq!(value["researchDirections"], Value::Array(Vec::new()));
        assert_eq!(value["nextId"], 4);
    }
}
