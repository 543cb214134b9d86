//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status line with the current tab and counts
//! - `KindTabs`: Stories / Proverbs / Music / Art tabs with their icons
//! - `SearchBar`: Search term and region selection
//!
//! ### Stateful Components (Persistent State + Transient Wrapper)
//!
//! The state struct lives in `TuiState`; the wrapper is built each frame
//! with borrowed state and props:
//! - `ContentList` / `ContentListState`: the filtered list and its selection
//! - `DetailPanel` / `DetailState`: the open item and related content
//! - `Catalog` / `CatalogState`: categories, events and submissions overlays
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file, shared layout helpers)
//! ├── title_bar.rs     (Top status line)
//! ├── kind_tabs.rs     (Content kind tabs)
//! ├── search_bar.rs    (Search + region)
//! ├── content_list.rs  (Filtered list, empty states)
//! ├── detail.rs        (Item overlay with related content)
//! └── catalog.rs       (List overlays)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

mod kind_tabs;
pub use kind_tabs::KindTabs;

mod search_bar;
pub use search_bar::SearchBar;

pub mod content_list;
pub use content_list::{ContentList, ContentListState};

pub mod detail;
pub use detail::{DetailPanel, DetailState};

pub mod catalog;
pub use catalog::{Catalog, CatalogEvent, CatalogState};

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
