//! A cached collection endpoint.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use labsite_core::news::News;
use labsite_core::patent::Patent;
use labsite_core::project::Project;
use labsite_core::publication::Publication;
use labsite_core::research::ResearchItem;
use labsite_core::team_member::TeamMember;
use labsite_core::todo::TodoItem;
use labsite_core::types::DbId;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::Instant;

use crate::error::ClientError;
use crate::transport::{ApiRequest, Transport};

/// How long a fetched list is served from the cache.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(5);

/// An entity addressable by id.
pub trait Keyed {
    fn key(&self) -> DbId;
}

macro_rules! keyed {
    ($($ty:ty),+ $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> DbId {
                self.id
            }
        })+
    };
}

keyed!(TeamMember, Publication, Patent, Project, News, ResearchItem, TodoItem);

struct CacheSlot<T> {
    items: Vec<T>,
    fetched_at: Instant,
}

/// Client for one collection endpoint plus the cache slot for its listing.
///
/// The lock is only held for synchronous reads and writes of the slot, never
/// across a request.
pub struct Resource<T> {
    transport: Arc<dyn Transport>,
    path: String,
    cache: Mutex<Option<CacheSlot<T>>>,
}

impl<T> Resource<T>
where
    T: Keyed + Clone + DeserializeOwned + Send,
{
    /// * `path` - Collection path under `/api`, e.g. `publications`.
    pub fn new(transport: Arc<dyn Transport>, path: impl Into<String>) -> Self {
        Self {
            transport,
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<CacheSlot<T>>> {
        // The slot is plain data; a panic elsewhere cannot leave it torn.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn item_path(&self, id: DbId) -> String {
        format!("{}/{id}", self.path)
    }

    /// The full listing. Served from the cache when it was fetched less than
    /// [`FRESHNESS_WINDOW`] ago, unless `force` is set.
    pub async fn list(&self, force: bool) -> Result<Vec<T>, ClientError> {
        if !force {
            if let Some(items) = self.fresh_items() {
                return Ok(items);
            }
        }

        let body = self
            .transport
            .send(ApiRequest::get(self.path.clone()))
            .await?
            .into_result()?;
        let items: Vec<T> = serde_json::from_value(body)?;
        tracing::debug!(path = %self.path, count = items.len(), "Listing fetched");
        *self.slot() = Some(CacheSlot {
            items: items.clone(),
            fetched_at: Instant::now(),
        });
        Ok(items)
    }

    /// One item, taken from a populated cache when present there. A 404 is
    /// `Ok(None)`.
    pub async fn get(&self, id: DbId) -> Result<Option<T>, ClientError> {
        let cached = self
            .slot()
            .as_ref()
            .and_then(|slot| slot.items.iter().find(|item| item.key() == id).cloned());
        if cached.is_some() {
            return Ok(cached);
        }

        match self.fetch(ApiRequest::get(self.item_path(id))).await {
            Ok(item) => Ok(Some(item)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Uncached listing with query parameters.
    pub async fn query(&self, params: &[(&str, &str)]) -> Result<Vec<T>, ClientError> {
        let request = params
            .iter()
            .fold(ApiRequest::get(self.path.clone()), |request, (key, value)| {
                request.with_query(key, *value)
            });
        self.fetch(request).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, input: &B) -> Result<T, ClientError> {
        let request = ApiRequest::new(Method::POST, self.path.clone())
            .with_body(serde_json::to_value(input)?);
        let item: T = self.fetch(request).await?;
        if let Some(slot) = self.slot().as_mut() {
            slot.items.push(item.clone());
        }
        Ok(item)
    }

    pub async fn update<P: Serialize + ?Sized>(&self, id: DbId, patch: &P) -> Result<T, ClientError> {
        let request = ApiRequest::new(Method::PATCH, self.item_path(id))
            .with_body(serde_json::to_value(patch)?);
        let item: T = self.fetch(request).await?;
        self.replace_cached(&item);
        Ok(item)
    }

    /// Delete an item. Returns `false` when the server had no such id.
    pub async fn delete(&self, id: DbId) -> Result<bool, ClientError> {
        let response = self
            .transport
            .send(ApiRequest::delete(self.item_path(id)))
            .await?;
        if response.status == 404 {
            return Ok(false);
        }
        response.into_result()?;
        if let Some(slot) = self.slot().as_mut() {
            slot.items.retain(|item| item.key() != id);
        }
        Ok(true)
    }

    /// Send a request whose response is a single item and reconcile the
    /// cache with it as with [`Resource::update`].
    pub(crate) async fn send_and_replace(&self, request: ApiRequest) -> Result<T, ClientError> {
        let item: T = self.fetch(request).await?;
        self.replace_cached(&item);
        Ok(item)
    }

    /// Drop the cached listing so the next [`Resource::list`] fetches.
    pub fn invalidate(&self) {
        *self.slot() = None;
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ClientError> {
        let body = self.transport.send(request).await?.into_result()?;
        Ok(serde_json::from_value(body)?)
    }

    fn fresh_items(&self) -> Option<Vec<T>> {
        self.slot()
            .as_ref()
            .filter(|slot| slot.fetched_at.elapsed() < FRESHNESS_WINDOW)
            .map(|slot| slot.items.clone())
    }

    fn replace_cached(&self, item: &T) {
        if let Some(slot) = self.slot().as_mut() {
            if let Some(existing) = slot.items.iter_mut().find(|cached| cached.key() == item.key()) {
                *existing = item.clone();
            }
        }
    }
}
