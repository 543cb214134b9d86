//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiError, ContentService, Fetcher, QueryCache};
use crate::core::content::{ContentItem, ContentKind, ContentStatus};
use crate::core::state::App;

/// Serves canned JSON by path and records every request. Unknown paths 404.
#[derive(Default)]
pub struct StaticFetcher {
    routes: HashMap<String, Value>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_string(), body);
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    fn base_url(&self) -> &str {
        "http://static.test"
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(path.to_string());
        }
        self.routes.get(path).cloned().ok_or_else(|| ApiError::Api {
            status: 404,
            message: format!("no route for {path}"),
        })
    }
}

/// An approved story with the given title and region.
pub fn item(id: i64, title: &str, region: Option<&str>) -> ContentItem {
    ContentItem {
        id,
        kind: ContentKind::Story,
        title: title.to_string(),
        description: String::new(),
        content: String::new(),
        region: region.map(str::to_string),
        featured: false,
        status: Some(ContentStatus::Approved),
        created_at: None,
        updated_at: None,
        contributor_id: None,
        contributor: None,
    }
}

/// Creates a test App backed by a fetcher with no routes.
pub fn test_app() -> App {
    let service = ContentService::new(Arc::new(StaticFetcher::new()), Arc::new(QueryCache::new()));
    App::new(Arc::new(service))
}
