//! # Actions
//!
//! Everything that can happen in Umurage becomes an `Action`.
//! User types into the search bar? That's `Action::SearchInput(c)`.
//! A fetch finishes? That's `Action::ContentLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller must
//! perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Results of background fetches carry enough to tell whether they still
//! belong to the current view (generation number, item id, scope). Results
//! for a view that has been torn down are dropped.

use log::{debug, info, warn};

use crate::api::ApiError;
use crate::core::content::{Category, ContentItem, ContentKind, Event, Submission};
use crate::core::filter::{Audience, RegionFilter};
use crate::core::state::{App, CatalogKind, DetailView, Loadable};

#[derive(Debug)]
pub enum Action {
    /// Initial load of the configured tab.
    Start,
    SelectKind(ContentKind),
    NextKind,
    PrevKind,
    SearchInput(char),
    SearchBackspace,
    SetSearch(String),
    CycleRegion,
    SetRegion(RegionFilter),
    ClearFilters,
    Refresh,
    ContentLoaded {
        generation: u64,
        kind: ContentKind,
        result: Result<Vec<ContentItem>, ApiError>,
    },
    OpenDetail(i64),
    CloseDetail,
    DetailLoaded {
        id: i64,
        result: Result<ContentItem, ApiError>,
    },
    OpenCatalog(CatalogKind),
    CloseCatalog,
    CategoriesLoaded(Result<Vec<Category>, ApiError>),
    EventsLoaded(Result<Vec<Event>, ApiError>),
    OpenCategorySubmissions(i64),
    SubmissionsLoaded {
        scope: Option<i64>,
        result: Result<Vec<Submission>, ApiError>,
    },
    Quit,
}

/// I/O the event loop must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Replace any running content fetch with this one.
    FetchContent {
        kind: ContentKind,
        generation: u64,
        fresh: bool,
    },
    FetchDetail {
        kind: ContentKind,
        id: i64,
    },
    CancelDetail,
    FetchCategories {
        fresh: bool,
    },
    FetchEvents {
        fresh: bool,
    },
    FetchSubmissions {
        scope: Option<i64>,
        fresh: bool,
    },
    CancelCatalog,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    let effect = match action {
        Action::Start => begin_content_fetch(app, false),

        Action::SelectKind(kind) => select_kind(app, kind),
        Action::NextKind => select_kind(app, app.kind.next()),
        Action::PrevKind => select_kind(app, app.kind.prev()),

        Action::SearchInput(c) => {
            if !c.is_control() {
                app.filter.search_term.push(c);
            }
            Effect::None
        }
        Action::SearchBackspace => {
            app.filter.search_term.pop();
            Effect::None
        }
        Action::SetSearch(term) => {
            app.filter.search_term = term;
            Effect::None
        }
        Action::CycleRegion => {
            app.filter.region = app.filter.region.cycle(&app.region_options);
            app.status_message = format!("Region: {}", app.filter.region.label());
            Effect::None
        }
        Action::SetRegion(region) => {
            app.filter.region = region;
            Effect::None
        }
        Action::ClearFilters => {
            app.filter.clear();
            app.status_message = String::from("Filters cleared");
            Effect::None
        }

        Action::Refresh => refresh(app),

        Action::ContentLoaded {
            generation,
            kind,
            result,
        } => {
            if generation != app.fetch_generation || kind != app.kind {
                debug!(
                    "Discarding stale {} result (generation {}, current {})",
                    kind.path_segment(),
                    generation,
                    app.fetch_generation
                );
                return Effect::None;
            }
            app.is_loading = false;
            match result {
                Ok(items) => {
                    app.error = None;
                    app.set_items(items);
                    app.status_message = format!("{} {}", app.items().len(), kind.label().to_lowercase());
                }
                Err(e) => {
                    warn!("Failed to load {}: {}", kind.path_segment(), e);
                    app.set_items(Vec::new());
                    app.error = Some(e.user_message().to_string());
                    app.status_message = String::from("Load failed");
                }
            }
            Effect::None
        }

        Action::OpenDetail(id) => match app.item_by_id(id) {
            Some(item) => {
                let summary = item.clone();
                let kind = summary.kind;
                app.detail = Some(DetailView {
                    summary,
                    full: Loadable::Loading,
                });
                Effect::FetchDetail { kind, id }
            }
            None => {
                warn!("OpenDetail for unknown id {}", id);
                Effect::None
            }
        },
        Action::CloseDetail => {
            if app.detail.take().is_some() {
                Effect::CancelDetail
            } else {
                Effect::None
            }
        }
        Action::DetailLoaded { id, result } => {
            match app.detail.as_mut() {
                Some(detail) if detail.id() == id => {
                    if let Err(e) = &result {
                        warn!("Failed to load item {}: {}", id, e);
                        app.status_message = e.user_message().to_string();
                    }
                    detail.full = Loadable::from_result(result);
                }
                _ => debug!("Discarding detail result for closed item {}", id),
            }
            Effect::None
        }

        Action::OpenCatalog(kind) => open_catalog(app, kind),
        Action::CloseCatalog => {
            app.catalog = None;
            // Anything still loading was cancelled with the overlay
            reset_if_loading(&mut app.categories);
            reset_if_loading(&mut app.events);
            reset_if_loading(&mut app.submissions);
            Effect::CancelCatalog
        }
        Action::CategoriesLoaded(result) => {
            if app.categories.is_loading() {
                log_failure("categories", &result);
                app.categories = Loadable::from_result(result);
            }
            Effect::None
        }
        Action::EventsLoaded(result) => {
            if app.events.is_loading() {
                log_failure("events", &result);
                app.events = Loadable::from_result(result);
            }
            Effect::None
        }
        Action::OpenCategorySubmissions(category_id) => {
            if app.audience != Audience::Admin {
                app.status_message = String::from("Submissions are only available in admin mode");
                return Effect::None;
            }
            app.catalog = Some(CatalogKind::Submissions);
            load_submissions(app, Some(category_id), false)
        }
        Action::SubmissionsLoaded { scope, result } => {
            if app.submissions.is_loading() && scope == app.submissions_scope {
                log_failure("submissions", &result);
                app.submissions = Loadable::from_result(result);
            }
            Effect::None
        }

        Action::Quit => {
            info!("Quit requested");
            Effect::Quit
        }
    };

    app.refresh_visible();
    effect
}

fn begin_content_fetch(app: &mut App, fresh: bool) -> Effect {
    app.fetch_generation += 1;
    app.is_loading = true;
    app.error = None;
    Effect::FetchContent {
        kind: app.kind,
        generation: app.fetch_generation,
        fresh,
    }
}

/// Switching tabs tears down the current view: its list, filter and detail.
fn select_kind(app: &mut App, kind: ContentKind) -> Effect {
    info!("Switching to {}", kind.label());
    app.kind = kind;
    app.filter.clear();
    app.detail = None;
    app.set_items(Vec::new());
    app.status_message = format!("Loading {}...", kind.label().to_lowercase());
    begin_content_fetch(app, false)
}

fn refresh(app: &mut App) -> Effect {
    match app.catalog {
        Some(CatalogKind::Categories) => {
            app.categories = Loadable::Loading;
            Effect::FetchCategories { fresh: true }
        }
        Some(CatalogKind::Events) => {
            app.events = Loadable::Loading;
            Effect::FetchEvents { fresh: true }
        }
        Some(CatalogKind::Submissions) => load_submissions(app, app.submissions_scope, true),
        None => {
            app.status_message = format!("Refreshing {}...", app.kind.label().to_lowercase());
            begin_content_fetch(app, true)
        }
    }
}

fn open_catalog(app: &mut App, kind: CatalogKind) -> Effect {
    if kind == CatalogKind::Submissions && app.audience != Audience::Admin {
        app.status_message = String::from("Submissions are only available in admin mode");
        return Effect::None;
    }
    app.catalog = Some(kind);
    match kind {
        CatalogKind::Categories => {
            if app.categories.ready().is_some() {
                return Effect::None;
            }
            app.categories = Loadable::Loading;
            Effect::FetchCategories { fresh: false }
        }
        CatalogKind::Events => {
            if app.events.ready().is_some() {
                return Effect::None;
            }
            app.events = Loadable::Loading;
            Effect::FetchEvents { fresh: false }
        }
        CatalogKind::Submissions => {
            if app.submissions.ready().is_some() && app.submissions_scope.is_none() {
                return Effect::None;
            }
            load_submissions(app, None, false)
        }
    }
}

fn load_submissions(app: &mut App, scope: Option<i64>, fresh: bool) -> Effect {
    app.submissions_scope = scope;
    app.submissions = Loadable::Loading;
    Effect::FetchSubmissions { scope, fresh }
}

fn reset_if_loading<T>(slot: &mut Loadable<T>) {
    if slot.is_loading() {
        *slot = Loadable::Idle;
    }
}

fn log_failure<T>(what: &str, result: &Result<T, ApiError>) {
    if let Err(e) = result {
        warn!("Failed to load {}: {}", what, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::ContentStatus;
    use crate::core::filter::ALL_REGIONS;
    use crate::test_support::{item, test_app};

    fn loaded(app: &mut App, items: Vec<ContentItem>) {
        let effect = update(app, Action::Start);
        let Effect::FetchContent { kind, generation, .. } = effect else {
            panic!("expected FetchContent, got {effect:?}");
        };
        update(
            app,
            Action::ContentLoaded {
                generation,
                kind,
                result: Ok(items),
            },
        );
    }

    fn two_items() -> Vec<ContentItem> {
        vec![
            item(1, "Akebo", Some("North")),
            item(2, "Imana", Some("South")),
        ]
    }

    fn visible_titles(app: &App) -> Vec<String> {
        app.visible_items().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn test_start_requests_configured_kind() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Start);
        assert_eq!(
            effect,
            Effect::FetchContent {
                kind: ContentKind::Story,
                generation: 1,
                fresh: false
            }
        );
        assert!(app.is_loading);
    }

    #[test]
    fn test_loaded_items_become_visible() {
        let mut app = test_app();
        loaded(&mut app, two_items());
        assert!(!app.is_loading);
        assert_eq!(visible_titles(&app), vec!["Akebo", "Imana"]);
    }

    #[test]
    fn test_search_scenario() {
        let mut app = test_app();
        loaded(&mut app, two_items());
        for c in "akebo".chars() {
            update(&mut app, Action::SearchInput(c));
        }
        assert_eq!(app.filter.region.label(), ALL_REGIONS);
        assert_eq!(visible_titles(&app), vec!["Akebo"]);

        update(&mut app, Action::SearchBackspace);
        assert_eq!(app.filter.search_term, "akeb");
    }

    #[test]
    fn test_region_scenario() {
        let mut app = test_app();
        loaded(&mut app, two_items());
        update(&mut app, Action::SetRegion(RegionFilter::parse("South")));
        assert_eq!(visible_titles(&app), vec!["Imana"]);
    }

    #[test]
    fn test_no_match_then_clear_filters() {
        let mut app = test_app();
        loaded(&mut app, two_items());
        update(&mut app, Action::SetSearch("zzz".to_string()));
        update(&mut app, Action::SetRegion(RegionFilter::parse("South")));
        assert_eq!(app.visible_count(), 0);

        update(&mut app, Action::ClearFilters);
        assert!(app.filter.search_term.is_empty());
        assert_eq!(app.filter.region, RegionFilter::All);
        assert_eq!(visible_titles(&app), vec!["Akebo", "Imana"]);
    }

    #[test]
    fn test_control_chars_do_not_reach_search() {
        let mut app = test_app();
        update(&mut app, Action::SearchInput('\n'));
        assert!(app.filter.search_term.is_empty());
    }

    #[test]
    fn test_cycle_region_walks_options() {
        let mut app = test_app();
        app.known_regions = vec!["North".to_string()];
        loaded(&mut app, two_items());
        assert_eq!(app.region_options, vec!["North", "South"]);

        update(&mut app, Action::CycleRegion);
        assert_eq!(visible_titles(&app), vec!["Akebo"]);
        update(&mut app, Action::CycleRegion);
        assert_eq!(visible_titles(&app), vec!["Imana"]);
        update(&mut app, Action::CycleRegion);
        assert_eq!(app.filter.region, RegionFilter::All);
        assert_eq!(app.status_message, "Region: All Regions");
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut app = test_app();
        update(&mut app, Action::Start);
        let effect = update(&mut app, Action::SelectKind(ContentKind::Art));
        assert_eq!(
            effect,
            Effect::FetchContent {
                kind: ContentKind::Art,
                generation: 2,
                fresh: false
            }
        );

        update(
            &mut app,
            Action::ContentLoaded {
                generation: 1,
                kind: ContentKind::Story,
                result: Ok(two_items()),
            },
        );
        assert!(app.items().is_empty());
        assert!(app.is_loading);
    }

    #[test]
    fn test_failure_degrades_to_empty_list_with_message() {
        let mut app = test_app();
        loaded(&mut app, two_items());
        let Effect::FetchContent { generation, .. } = update(&mut app, Action::Refresh) else {
            panic!("expected FetchContent");
        };
        update(
            &mut app,
            Action::ContentLoaded {
                generation,
                kind: ContentKind::Story,
                result: Err(ApiError::Api {
                    status: 500,
                    message: "db down".to_string(),
                }),
            },
        );
        assert!(app.items().is_empty());
        assert!(!app.is_loading);
        let error = app.error.clone().unwrap();
        assert!(!error.contains("db down"));
    }

    #[test]
    fn test_refresh_is_fresh() {
        let mut app = test_app();
        loaded(&mut app, two_items());
        let effect = update(&mut app, Action::Refresh);
        assert!(matches!(effect, Effect::FetchContent { fresh: true, .. }));
        // Items stay on screen while the refresh runs
        assert_eq!(app.visible_count(), 2);
    }

    #[test]
    fn test_switching_kind_resets_view() {
        let mut app = test_app();
        loaded(&mut app, two_items());
        update(&mut app, Action::SetSearch("ak".to_string()));
        update(&mut app, Action::OpenDetail(1));

        update(&mut app, Action::NextKind);
        assert_eq!(app.kind, ContentKind::Proverb);
        assert!(app.filter.search_term.is_empty());
        assert!(app.detail.is_none());
        assert!(app.items().is_empty());

        update(&mut app, Action::PrevKind);
        update(&mut app, Action::PrevKind);
        assert_eq!(app.kind, ContentKind::Art);
    }

    #[test]
    fn test_detail_lifecycle() {
        let mut app = test_app();
        loaded(&mut app, two_items());

        let effect = update(&mut app, Action::OpenDetail(2));
        assert_eq!(
            effect,
            Effect::FetchDetail {
                kind: ContentKind::Story,
                id: 2
            }
        );
        assert!(app.detail.as_ref().unwrap().full.is_loading());

        let mut full = item(2, "Imana", Some("South"));
        full.content = "Imana yirirwa ahandi".to_string();
        update(&mut app, Action::DetailLoaded { id: 2, result: Ok(full) });
        assert_eq!(app.detail.as_ref().unwrap().item().content, "Imana yirirwa ahandi");

        assert_eq!(update(&mut app, Action::CloseDetail), Effect::CancelDetail);
        assert_eq!(update(&mut app, Action::CloseDetail), Effect::None);
    }

    #[test]
    fn test_detail_result_for_closed_item_is_dropped() {
        let mut app = test_app();
        loaded(&mut app, two_items());
        update(&mut app, Action::OpenDetail(1));
        update(
            &mut app,
            Action::DetailLoaded {
                id: 2,
                result: Ok(item(2, "Imana", None)),
            },
        );
        assert!(app.detail.as_ref().unwrap().full.is_loading());
    }

    #[test]
    fn test_open_detail_unknown_id() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::OpenDetail(99)), Effect::None);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_catalog_fetches_once() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::OpenCatalog(CatalogKind::Categories)),
            Effect::FetchCategories { fresh: false }
        );
        update(&mut app, Action::CategoriesLoaded(Ok(Vec::new())));
        update(&mut app, Action::CloseCatalog);

        assert_eq!(
            update(&mut app, Action::OpenCatalog(CatalogKind::Categories)),
            Effect::None
        );
        assert_eq!(
            update(&mut app, Action::Refresh),
            Effect::FetchCategories { fresh: true }
        );
    }

    #[test]
    fn test_cancelled_catalog_reloads_next_time() {
        let mut app = test_app();
        update(&mut app, Action::OpenCatalog(CatalogKind::Events));
        assert_eq!(update(&mut app, Action::CloseCatalog), Effect::CancelCatalog);
        assert_eq!(app.events, Loadable::Idle);

        // A late result for the cancelled request is ignored
        update(&mut app, Action::EventsLoaded(Ok(Vec::new())));
        assert_eq!(app.events, Loadable::Idle);

        assert_eq!(
            update(&mut app, Action::OpenCatalog(CatalogKind::Events)),
            Effect::FetchEvents { fresh: false }
        );
    }

    #[test]
    fn test_submissions_are_admin_only() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::OpenCatalog(CatalogKind::Submissions)),
            Effect::None
        );
        assert!(app.catalog.is_none());
        assert_eq!(update(&mut app, Action::OpenCategorySubmissions(1)), Effect::None);

        app.audience = Audience::Admin;
        assert_eq!(
            update(&mut app, Action::OpenCatalog(CatalogKind::Submissions)),
            Effect::FetchSubmissions {
                scope: None,
                fresh: false
            }
        );
    }

    #[test]
    fn test_category_submissions_scope() {
        let mut app = test_app();
        app.audience = Audience::Admin;
        assert_eq!(
            update(&mut app, Action::OpenCategorySubmissions(4)),
            Effect::FetchSubmissions {
                scope: Some(4),
                fresh: false
            }
        );

        // Result for a different scope is dropped
        update(
            &mut app,
            Action::SubmissionsLoaded {
                scope: None,
                result: Ok(Vec::new()),
            },
        );
        assert!(app.submissions.is_loading());

        update(
            &mut app,
            Action::SubmissionsLoaded {
                scope: Some(4),
                result: Err(ApiError::Network("reset".to_string())),
            },
        );
        assert!(matches!(app.submissions, Loadable::Failed(_)));
    }

    #[test]
    fn test_admin_sees_pending_items() {
        let mut app = test_app();
        app.audience = Audience::Admin;
        let mut pending = item(3, "Ubuhake", None);
        pending.status = Some(ContentStatus::Pending);
        loaded(&mut app, vec![pending]);
        assert_eq!(app.visible_count(), 1);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
