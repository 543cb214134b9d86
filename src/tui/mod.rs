//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! Every `Effect` that needs the network becomes a tokio task whose result
//! comes back as an `Action` over a channel. Each view (content list, detail
//! overlay, catalog overlay) owns at most one task; starting a new fetch for
//! a view or closing it aborts the previous one. Results that still slip
//! through are recognised as stale by `update()`.
//!
//! ## Redraw Strategy
//!
//! Frames are drawn only after input or a background result. The poll
//! timeout is short while something is loading so results show promptly.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::future::Future;
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::api::ContentService;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::content::ContentKind;
use crate::core::filter::Audience;
use crate::core::state::{App, CatalogKind};
use crate::tui::component::EventHandler;
use crate::tui::components::content_list::ContentListEvent;
use crate::tui::components::detail::DetailEvent;
use crate::tui::components::{CatalogEvent, CatalogState, ContentListState, DetailState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub content_list: ContentListState,
    pub detail: DetailState,
    /// Follows `App::catalog`; rebuilt by the renderer when the kind changes.
    pub catalog: Option<CatalogState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            content_list: ContentListState::new(),
            detail: DetailState::new(),
            catalog: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// The running background task of each view.
#[derive(Default)]
struct ViewTasks {
    content: Option<AbortHandle>,
    detail: Option<AbortHandle>,
    catalog: Option<AbortHandle>,
}

impl ViewTasks {
    fn abort_all(&mut self) {
        for slot in [&mut self.content, &mut self.detail, &mut self.catalog] {
            cancel(slot);
        }
    }
}

fn replace(slot: &mut Option<AbortHandle>, handle: AbortHandle) {
    if let Some(previous) = slot.replace(handle) {
        previous.abort();
    }
}

fn cancel(slot: &mut Option<AbortHandle>) {
    if let Some(handle) = slot.take() {
        handle.abort();
    }
}

pub fn run(config: ResolvedConfig, service: Arc<ContentService>) -> std::io::Result<()> {
    info!("Browsing {} as {:?}", service.base_url(), config.audience);
    let mut app = App::from_config(service, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut tasks = ViewTasks::default();

    let effect = update(&mut app, Action::Start);
    apply_effect(&app, effect, &mut tasks, &tx);

    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let busy = app.is_loading || app.detail.as_ref().is_some_and(|d| d.full.is_loading());
        let timeout = if busy {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in handle_event(&event, &app, &mut tui) {
                let effect = update(&mut app, action);
                if effect == Effect::Quit {
                    should_quit = true;
                    break;
                }
                apply_effect(&app, effect, &mut tasks, &tx);
            }
            if should_quit {
                break;
            }
        }

        // Results from background fetches
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            apply_effect(&app, effect, &mut tasks, &tx);
        }
    }

    tasks.abort_all();
    ratatui::restore();
    info!("Umurage shut down");
    Ok(())
}

/// Translates one terminal event into the actions it causes, updating
/// presentation state on the way.
fn handle_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Vec<Action> {
    match event {
        TuiEvent::Resize => return Vec::new(),
        TuiEvent::ForceQuit => return vec![Action::Quit],
        _ => {}
    }

    // The detail overlay takes every key while open
    if app.detail.is_some() {
        return match tui.detail.handle_event(event) {
            Some(DetailEvent::Close) => vec![Action::CloseDetail],
            None => Vec::new(),
        };
    }

    if let Some(kind) = app.catalog {
        if matches!(event, TuiEvent::Refresh) {
            return vec![Action::Refresh];
        }
        let Some(state) = tui.catalog.as_mut() else {
            // Not drawn yet; only closing makes sense
            return match event {
                TuiEvent::Escape => vec![Action::CloseCatalog],
                _ => Vec::new(),
            };
        };
        return match state.handle_event(event) {
            Some(CatalogEvent::Dismiss) => vec![Action::CloseCatalog],
            Some(CatalogEvent::Select(position)) => catalog_selection(app, kind, position),
            None => Vec::new(),
        };
    }

    let action = match event {
        TuiEvent::InputChar(c) => Action::SearchInput(*c),
        TuiEvent::Backspace => Action::SearchBackspace,
        TuiEvent::Paste(text) => {
            let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
            Action::SetSearch(format!("{}{}", app.filter.search_term, pasted))
        }
        TuiEvent::CycleRegion => Action::CycleRegion,
        TuiEvent::ClearFilters => Action::ClearFilters,
        TuiEvent::NextTab => Action::NextKind,
        TuiEvent::PrevTab => Action::PrevKind,
        TuiEvent::Refresh => return vec![Action::Refresh],
        TuiEvent::OpenCategories => return vec![Action::OpenCatalog(CatalogKind::Categories)],
        TuiEvent::OpenEvents => return vec![Action::OpenCatalog(CatalogKind::Events)],
        TuiEvent::OpenSubmissions => return vec![Action::OpenCatalog(CatalogKind::Submissions)],
        _ => {
            return match tui.content_list.handle_event(event) {
                Some(ContentListEvent::Open(position)) => match app.visible_item(position) {
                    Some(item) => {
                        tui.detail.reset();
                        vec![Action::OpenDetail(item.id)]
                    }
                    None => Vec::new(),
                },
                None => Vec::new(),
            };
        }
    };

    // The visible list changes under every action above
    tui.content_list.reset();
    vec![action]
}

/// Enter on a catalog row. Only categories lead anywhere.
fn catalog_selection(app: &App, kind: CatalogKind, position: usize) -> Vec<Action> {
    if kind != CatalogKind::Categories {
        return Vec::new();
    }
    let Some(category) = app.categories.ready().and_then(|list| list.get(position)) else {
        return Vec::new();
    };
    if app.audience == Audience::Admin {
        return vec![Action::OpenCategorySubmissions(category.id)];
    }
    match ContentKind::from_category(category.icon) {
        Some(kind) => vec![Action::CloseCatalog, Action::SelectKind(kind)],
        None => {
            info!("Category '{}' has no content tab", category.name);
            Vec::new()
        }
    }
}

/// Starts or cancels the background work an update asked for.
fn apply_effect(app: &App, effect: Effect, tasks: &mut ViewTasks, tx: &mpsc::Sender<Action>) {
    let service = app.service.clone();
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::FetchContent {
            kind,
            generation,
            fresh,
        } => {
            if fresh {
                service.invalidate_content(kind);
            }
            info!("Fetching {} (generation {})", kind.path_segment(), generation);
            let handle = spawn_fetch(tx, async move {
                Action::ContentLoaded {
                    generation,
                    kind,
                    result: service.list_content(kind).await,
                }
            });
            replace(&mut tasks.content, handle);
        }
        Effect::FetchDetail { kind, id } => {
            let handle = spawn_fetch(tx, async move {
                Action::DetailLoaded {
                    id,
                    result: service.get_content(kind, id).await,
                }
            });
            replace(&mut tasks.detail, handle);
        }
        Effect::CancelDetail => cancel(&mut tasks.detail),
        Effect::FetchCategories { fresh } => {
            if fresh {
                service.invalidate_categories();
            }
            let handle = spawn_fetch(tx, async move {
                Action::CategoriesLoaded(service.list_categories().await)
            });
            replace(&mut tasks.catalog, handle);
        }
        Effect::FetchEvents { fresh } => {
            if fresh {
                service.invalidate_events();
            }
            let handle = spawn_fetch(tx, async move { Action::EventsLoaded(service.list_events().await) });
            replace(&mut tasks.catalog, handle);
        }
        Effect::FetchSubmissions { scope, fresh } => {
            if fresh {
                service.invalidate_submissions();
            }
            let handle = spawn_fetch(tx, async move {
                let result = match scope {
                    Some(category_id) => service.list_submissions_by_category(category_id).await,
                    None => service.list_submissions().await,
                };
                Action::SubmissionsLoaded { scope, result }
            });
            replace(&mut tasks.catalog, handle);
        }
        Effect::CancelCatalog => cancel(&mut tasks.catalog),
    }
}

fn spawn_fetch<F>(tx: &mpsc::Sender<Action>, fetch: F) -> AbortHandle
where
    F: Future<Output = Action> + Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        let action = fetch.await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver fetch result: receiver dropped");
        }
    })
    .abort_handle()
}
