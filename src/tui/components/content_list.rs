//! # Content List Component
//!
//! The filtered list for the current tab, with its empty states.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ContentListState` lives in `TuiState`
//! - `ContentList` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::content::{ContentItem, ContentStatus};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::truncate_str;
use crate::tui::event::TuiEvent;

const PAGE: usize = 10;

/// Persistent selection for the list.
#[derive(Default)]
pub struct ContentListState {
    pub selected: usize,
    pub list_state: ListState,
    len: usize,
}

impl ContentListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamps the selection to a list of `len` rows.
    pub fn sync(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        *self.list_state.offset_mut() = 0;
        self.sync(self.len);
    }

    fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, self.len as isize - 1) as usize;
        self.list_state.select(Some(self.selected));
    }
}

/// Events emitted by the content list.
#[derive(Debug, PartialEq, Eq)]
pub enum ContentListEvent {
    /// Open the row at this position in the visible list.
    Open(usize),
}

impl EventHandler for ContentListState {
    type Event = ContentListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ContentListEvent> {
        match event {
            TuiEvent::CursorUp => self.move_by(-1),
            TuiEvent::CursorDown => self.move_by(1),
            TuiEvent::ScrollPageUp => self.move_by(-(PAGE as isize)),
            TuiEvent::ScrollPageDown => self.move_by(PAGE as isize),
            TuiEvent::Submit if self.len > 0 => return Some(ContentListEvent::Open(self.selected)),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the list.
pub struct ContentList<'a> {
    pub state: &'a mut ContentListState,
    pub items: Vec<&'a ContentItem>,
    /// Total before filtering, to tell "nothing here" from "nothing matches".
    pub total: usize,
    pub kind_label: &'a str,
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub search_term: &'a str,
    pub region_label: &'a str,
    pub show_status: bool,
}

impl ContentList<'_> {
    /// Message for an empty list, or None when there are rows to show.
    pub fn empty_message(&self) -> Option<String> {
        if !self.items.is_empty() {
            return None;
        }
        let kind = self.kind_label.to_lowercase();
        let message = if self.is_loading {
            format!("Loading {kind}...")
        } else if let Some(error) = self.error {
            format!("⚠ {error}\n\nPress Ctrl+R to try again.")
        } else if self.total == 0 {
            format!("No {kind} have been shared yet.")
        } else {
            let mut what = String::from("Nothing found");
            if !self.search_term.is_empty() {
                what.push_str(&format!(" for \"{}\"", self.search_term));
            }
            what.push_str(&format!(" in {}.", self.region_label));
            format!("{what}\n\nPress Ctrl+L to clear filters.")
        };
        Some(message)
    }

    fn row(&self, item: &ContentItem, width: usize, selected: bool) -> ListItem<'static> {
        let base = if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };

        let star = if item.featured { "★ " } else { "  " };
        let region = item.region.as_deref().map(|r| format!("  [{r}]")).unwrap_or_default();
        let status = match item.status {
            Some(status) if self.show_status => format!("  {}", status.label()),
            _ => String::new(),
        };
        let title_width = width
            .saturating_sub(star.width())
            .saturating_sub(region.width())
            .saturating_sub(status.width());
        let title = format!("{:<w$}", truncate_str(&item.title, title_width), w = title_width);

        let status_color = match item.status {
            Some(ContentStatus::Pending) => Color::Yellow,
            Some(ContentStatus::Rejected) => Color::Red,
            _ => Color::Green,
        };

        let mut spans = vec![
            Span::styled(star, base.fg(Color::Yellow)),
            Span::styled(title, base),
            Span::styled(region, if selected { base } else { Style::default().fg(Color::Cyan) }),
        ];
        if !status.is_empty() {
            spans.push(Span::styled(status, if selected { base } else { Style::default().fg(status_color) }));
        }

        let description = Line::from(Span::styled(
            format!("  {}", truncate_str(&item.description, width.saturating_sub(2))),
            Style::default().fg(Color::DarkGray),
        ));

        ListItem::new(vec![Line::from(spans), description])
    }
}

impl Component for ContentList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.items.len());

        let block = Block::bordered()
            .title(format!(" {} ", self.kind_label))
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));

        if let Some(message) = self.empty_message() {
            let paragraph = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| self.row(item, inner_width, i == self.state.selected))
            .collect();

        let list = List::new(rows).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
