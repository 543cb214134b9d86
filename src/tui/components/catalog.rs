//! # Catalog Component
//!
//! Overlay listing categories, events or submissions. Opened with
//! Ctrl+K, Ctrl+E and Ctrl+S (admin).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CatalogState` lives in `TuiState`
//! - `Catalog` is created each frame with borrowed state and the rows

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::content::{Category, ContentStatus, Event, Submission};
use crate::core::state::{CatalogKind, Loadable};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{centered_rect, truncate_str};
use crate::tui::event::TuiEvent;

pub struct CatalogState {
    pub kind: CatalogKind,
    pub selected: usize,
    pub list_state: ListState,
    len: usize,
}

impl CatalogState {
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            selected: 0,
            list_state: ListState::default(),
            len: 0,
        }
    }

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
}

#[derive(Debug, PartialEq, Eq)]
pub enum CatalogEvent {
    Dismiss,
    /// Row position in the listed records.
    Select(usize),
}

impl EventHandler for CatalogState {
    type Event = CatalogEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CatalogEvent> {
        match event {
            TuiEvent::Escape => Some(CatalogEvent::Dismiss),
            TuiEvent::CursorUp => {
                if self.len > 0 {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if self.len > 0 {
                    self.selected = (self.selected + 1).min(self.len - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit if self.len > 0 => Some(CatalogEvent::Select(self.selected)),
            _ => None,
        }
    }
}

/// One row: a leading tag, the main text and a dim trailer.
#[derive(Debug)]
pub struct CatalogRow {
    pub tag: String,
    pub tag_color: Color,
    pub text: String,
    pub detail: String,
}

impl CatalogRow {
    pub fn category(category: &Category) -> Self {
        Self {
            tag: category.icon.glyph().to_string(),
            tag_color: Color::Cyan,
            text: category.name.clone(),
            detail: category.description.clone().unwrap_or_default(),
        }
    }

    pub fn event(event: &Event) -> Self {
        let date = event
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "TBA".to_string());
        Self {
            tag: date,
            tag_color: Color::Yellow,
            text: event.title.clone(),
            detail: event.location.clone().unwrap_or_default(),
        }
    }

    pub fn submission(submission: &Submission) -> Self {
        let tag_color = match submission.status {
            ContentStatus::Pending => Color::Yellow,
            ContentStatus::Approved => Color::Green,
            ContentStatus::Rejected => Color::Red,
        };
        let mut detail = submission.region.clone().unwrap_or_default();
        if let Some(name) = &submission.submitter_name {
            if !detail.is_empty() {
                detail.push_str(" · ");
            }
            detail.push_str(name);
        }
        Self {
            tag: format!("{:<8}", submission.status.label()),
            tag_color,
            text: submission.title.clone(),
            detail,
        }
    }
}

/// Maps a loadable list to rows, or the message to show instead.
pub fn rows_for<T>(
    loadable: &Loadable<Vec<T>>,
    what: &str,
    row: impl Fn(&T) -> CatalogRow,
) -> Result<Vec<CatalogRow>, String> {
    match loadable {
        Loadable::Idle | Loadable::Loading => Err(format!("Loading {what}...")),
        Loadable::Failed(message) => Err(format!("⚠ {message}\n\nPress Ctrl+R to try again.")),
        Loadable::Ready(records) if records.is_empty() => Err(format!("No {what} yet.")),
        Loadable::Ready(records) => Ok(records.iter().map(row).collect()),
    }
}

pub struct Catalog<'a> {
    pub state: &'a mut CatalogState,
    pub title: String,
    pub rows: Result<Vec<CatalogRow>, String>,
    pub help: &'a str,
}

impl Component for Catalog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .title_bottom(Line::from(format!(" {} ", self.help)).centered())
            .padding(Padding::horizontal(1));

        let rows = match &self.rows {
            Ok(rows) => rows,
            Err(message) => {
                self.state.sync(0);
                let paragraph = Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: false })
                    .block(block);
                frame.render_widget(paragraph, overlay);
                return;
            }
        };
        self.state.sync(rows.len());

        let inner_width = overlay.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let selected = i == self.state.selected;
                let style = if selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let room = inner_width.saturating_sub(row.tag.width() + 2);
                let text = truncate_str(&row.text, room);
                let detail_room = room.saturating_sub(text.width() + 2);

                let mut spans = vec![
                    Span::styled(row.tag.clone(), if selected { style } else { Style::default().fg(row.tag_color) }),
                    Span::styled("  ", style),
                    Span::styled(text, style),
                ];
                if !row.detail.is_empty() && detail_room > 3 {
                    spans.push(Span::styled(
                        format!("  {}", truncate_str(&row.detail, detail_room)),
                        if selected { style } else { Style::default().fg(Color::DarkGray) },
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
