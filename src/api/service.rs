//! Typed endpoints over a [`Fetcher`] and a shared [`QueryCache`].

use std::sync::Arc;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::api::cache::QueryCache;
use crate::api::fetcher::{ApiError, Fetcher};
use crate::core::content::{Category, ContentItem, ContentKind, Event, Submission};

pub struct ContentService {
    fetcher: Arc<dyn Fetcher>,
    cache: Arc<QueryCache>,
}

impl ContentService {
    pub fn new(fetcher: Arc<dyn Fetcher>, cache: Arc<QueryCache>) -> Self {
        Self { fetcher, cache }
    }

    pub fn base_url(&self) -> &str {
        self.fetcher.base_url()
    }

    async fn query<T: DeserializeOwned>(&self, path: String) -> Result<T, ApiError> {
        let fetcher = self.fetcher.clone();
        let request_path = path.clone();
        let value = self
            .cache
            .get_or_fetch(&path, move || async move { fetcher.get_json(&request_path).await })
            .await?;
        T::deserialize(value.as_ref()).map_err(|e| ApiError::Parse(format!("{path}: {e}")))
    }

    // ---- categories ----

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.query("/categories".to_string()).await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, ApiError> {
        self.query(format!("/categories/{id}")).await
    }

    // ---- content ----

    pub async fn list_content(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ApiError> {
        let mut items: Vec<ContentItem> = self.query(content_path(kind)).await?;
        for item in &mut items {
            item.kind = kind;
        }
        info!("Loaded {} {} items", items.len(), kind.path_segment());
        Ok(items)
    }

    pub async fn get_content(&self, kind: ContentKind, id: i64) -> Result<ContentItem, ApiError> {
        let mut item: ContentItem = self.query(format!("{}/{id}", content_path(kind))).await?;
        item.kind = kind;
        Ok(item)
    }

    pub async fn list_stories(&self) -> Result<Vec<ContentItem>, ApiError> {
        self.list_content(ContentKind::Story).await
    }

    pub async fn get_story(&self, id: i64) -> Result<ContentItem, ApiError> {
        self.get_content(ContentKind::Story, id).await
    }

    // ---- events ----

    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        self.query("/events".to_string()).await
    }

    pub async fn get_event(&self, id: i64) -> Result<Event, ApiError> {
        self.query(format!("/events/{id}")).await
    }

    // ---- submissions ----

    pub async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError> {
        self.query("/submissions".to_string()).await
    }

    pub async fn get_submission(&self, id: i64) -> Result<Submission, ApiError> {
        self.query(format!("/submissions/{id}")).await
    }

    pub async fn list_submissions_by_category(&self, category_id: i64) -> Result<Vec<Submission>, ApiError> {
        self.query(format!("/submissions/category/{category_id}")).await
    }

    // ---- invalidation ----

    /// Drops the cached list and every cached single item of `kind`.
    pub fn invalidate_content(&self, kind: ContentKind) {
        debug!("Invalidating {}", kind.path_segment());
        self.cache.invalidate_prefix(&content_path(kind));
    }

    pub fn invalidate_categories(&self) {
        self.cache.invalidate_prefix("/categories");
    }

    pub fn invalidate_events(&self) {
        self.cache.invalidate_prefix("/events");
    }

    /// Drops the full queue and every per-category listing.
    pub fn invalidate_submissions(&self) {
        self.cache.invalidate_prefix("/submissions");
    }

    pub fn invalidate_all(&self) {
        debug!("Invalidating all cached queries");
        self.cache.clear();
    }
}

fn content_path(kind: ContentKind) -> String {
    format!("/content/{}", kind.path_segment())
}
