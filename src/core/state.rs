//! # Application State
//!
//! Core business state for Umurage. This module contains domain logic only;
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── service: Arc<ContentService>    // typed API + injected query cache
//! ├── audience: Audience              // public or admin
//! ├── kind: ContentKind               // current tab
//! ├── items: Vec<ContentItem>         // snapshot for the current tab
//! ├── filter: ContentFilter           // search term + region
//! ├── memo: FilterMemo                // visible indices, recomputed on change
//! ├── fetch_generation: u64           // stamps content fetches
//! ├── detail: Option<DetailView>      // open item, if any
//! ├── catalog: Option<CatalogKind>    // open overlay, if any
//! └── categories / events / submissions: Loadable<…>
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::{ApiError, ContentService};
use crate::core::config::ResolvedConfig;
use crate::core::config::{DEFAULT_REGIONS, DEFAULT_RELATED_LIMIT};
use crate::core::content::{Category, ContentItem, ContentKind, Event, Submission};
use crate::core::filter::{self, Audience, ContentFilter, FilterMemo, StatusCounts};

/// A value fetched in the background.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Loadable<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// Holds the user-facing message.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(e) => Loadable::Failed(e.user_message().to_string()),
        }
    }
}

/// Overlays listing records that are not content items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Categories,
    Events,
    Submissions,
}

impl CatalogKind {
    pub fn title(self) -> &'static str {
        match self {
            CatalogKind::Categories => "Categories",
            CatalogKind::Events => "Events",
            CatalogKind::Submissions => "Submissions",
        }
    }
}

/// The item open in the detail overlay. `summary` is the list snapshot shown
/// until the single-item request finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub summary: ContentItem,
    pub full: Loadable<ContentItem>,
}

impl DetailView {
    pub fn id(&self) -> i64 {
        self.summary.id
    }

    /// Best record available right now.
    pub fn item(&self) -> &ContentItem {
        self.full.ready().unwrap_or(&self.summary)
    }
}

pub struct App {
    pub service: Arc<ContentService>,
    pub audience: Audience,
    pub kind: ContentKind,
    items: Vec<ContentItem>,
    items_version: u64,
    pub filter: ContentFilter,
    memo: FilterMemo,
    pub known_regions: Vec<String>,
    pub region_options: Vec<String>,
    pub related_limit: usize,
    pub fetch_generation: u64,
    pub is_loading: bool,
    pub error: Option<String>,
    pub status_message: String,
    pub detail: Option<DetailView>,
    pub catalog: Option<CatalogKind>,
    pub categories: Loadable<Vec<Category>>,
    pub events: Loadable<Vec<Event>>,
    pub submissions: Loadable<Vec<Submission>>,
    /// Category the submissions list is narrowed to (None = all).
    pub submissions_scope: Option<i64>,
}

impl App {
    pub fn new(service: Arc<ContentService>) -> Self {
        let known_regions: Vec<String> = DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect();
        Self {
            service,
            audience: Audience::Public,
            kind: ContentKind::default(),
            items: Vec::new(),
            items_version: 0,
            filter: ContentFilter::default(),
            memo: FilterMemo::default(),
            region_options: known_regions.clone(),
            known_regions,
            related_limit: DEFAULT_RELATED_LIMIT,
            fetch_generation: 0,
            is_loading: false,
            error: None,
            status_message: String::from("Murakaza neza! Welcome to Umurage."),
            detail: None,
            catalog: None,
            categories: Loadable::Idle,
            events: Loadable::Idle,
            submissions: Loadable::Idle,
            submissions_scope: None,
        }
    }

    pub fn from_config(service: Arc<ContentService>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(service);
        app.audience = config.audience;
        app.kind = config.default_kind;
        app.related_limit = config.related_limit;
        app.known_regions = config.regions.clone();
        app.region_options = config.regions.clone();
        app
    }

    /// Replaces the list snapshot, dropping records this audience may not see.
    pub fn set_items(&mut self, items: Vec<ContentItem>) {
        let audience = self.audience;
        self.items = items.into_iter().filter(|item| audience.admits(item)).collect();
        self.items_version += 1;
        self.region_options = filter::region_options(&self.known_regions, &self.items);
        self.refresh_visible();
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Brings the visible list up to date with the items and filter.
    pub fn refresh_visible(&mut self) {
        self.memo.refresh(&self.items, self.items_version, &self.filter);
    }

    /// Items passing the current filter, in list order.
    pub fn visible_items(&self) -> impl Iterator<Item = &ContentItem> {
        self.memo.indices().iter().map(move |&i| &self.items[i])
    }

    pub fn visible_count(&self) -> usize {
        self.memo.indices().len()
    }

    pub fn visible_item(&self, position: usize) -> Option<&ContentItem> {
        self.memo.indices().get(position).map(|&i| &self.items[i])
    }

    pub fn item_by_id(&self, id: i64) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn related_to(&self, item: &ContentItem) -> Vec<&ContentItem> {
        filter::related(&self.items, item, self.related_limit)
    }

    pub fn status_counts(&self) -> StatusCounts {
        filter::status_counts(&self.items)
    }
}
