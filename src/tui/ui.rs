use crate::core::filter::Audience;
use crate::core::state::{App, CatalogKind};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::catalog::{CatalogRow, rows_for};
use crate::tui::components::{
    Catalog, CatalogState, ContentList, DetailPanel, KindTabs, SearchBar, TitleBar,
};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const HELP: &str = " ←/→ tabs · ↑/↓ select · Enter open · Tab region · Ctrl+L clear · Ctrl+R refresh · Ctrl+K categories · Ctrl+E events";
const ADMIN_HELP: &str = " · Ctrl+S submissions";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, tabs_area, search_area, list_area, help_area] = layout.areas(frame.area());
    let admin = app.audience == Audience::Admin;

    TitleBar {
        kind_label: app.kind.label().to_string(),
        shown: app.visible_count(),
        total: app.items().len(),
        status_message: app.status_message.clone(),
        is_loading: app.is_loading,
        counts: admin.then(|| app.status_counts()),
    }
    .render(frame, title_area);

    KindTabs { selected: app.kind }.render(frame, tabs_area);

    let overlay_open = app.detail.is_some() || app.catalog.is_some();
    SearchBar {
        term: &app.filter.search_term,
        region_label: app.filter.region.label(),
        filter_active: app.filter.is_active(),
        focused: !overlay_open,
    }
    .render(frame, search_area);

    ContentList {
        state: &mut tui.content_list,
        items: app.visible_items().collect(),
        total: app.items().len(),
        kind_label: app.kind.label(),
        is_loading: app.is_loading,
        error: app.error.as_deref(),
        search_term: &app.filter.search_term,
        region_label: app.filter.region.label(),
        show_status: admin,
    }
    .render(frame, list_area);

    draw_help(frame, help_area, admin);

    if let Some(detail) = &app.detail {
        DetailPanel {
            state: &mut tui.detail,
            detail,
            related: app.related_to(detail.item()),
            show_status: admin,
        }
        .render(frame, frame.area());
    } else {
        draw_catalog(frame, app, tui);
    }
}

fn draw_help(frame: &mut Frame, area: Rect, admin: bool) {
    let mut text = HELP.to_string();
    if admin {
        text.push_str(ADMIN_HELP);
    }
    let line = Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)));
    frame.render_widget(line, area);
}

fn draw_catalog(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let Some(kind) = app.catalog else {
        tui.catalog = None;
        return;
    };
    if tui.catalog.as_ref().map(|c| c.kind) != Some(kind) {
        tui.catalog = Some(CatalogState::new(kind));
    }
    let Some(state) = tui.catalog.as_mut() else {
        return;
    };

    let admin = app.audience == Audience::Admin;
    let (title, rows, help) = match kind {
        CatalogKind::Categories => (
            kind.title().to_string(),
            rows_for(&app.categories, "categories", CatalogRow::category),
            if admin {
                "Enter Submissions  Esc Back"
            } else {
                "Enter Browse  Esc Back"
            },
        ),
        CatalogKind::Events => (
            kind.title().to_string(),
            rows_for(&app.events, "events", CatalogRow::event),
            "Esc Back",
        ),
        CatalogKind::Submissions => (
            submissions_title(app),
            rows_for(&app.submissions, "submissions", CatalogRow::submission),
            "Esc Back",
        ),
    };

    Catalog {
        state,
        title,
        rows,
        help,
    }
    .render(frame, frame.area());
}

/// "Submissions", or "Submissions · Music" when narrowed to a category.
fn submissions_title(app: &App) -> String {
    let Some(scope) = app.submissions_scope else {
        return CatalogKind::Submissions.title().to_string();
    };
    let name = app
        .categories
        .ready()
        .and_then(|list| list.iter().find(|c| c.id == scope))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("category {scope}"));
    format!("{} · {}", CatalogKind::Submissions.title(), name)
}
