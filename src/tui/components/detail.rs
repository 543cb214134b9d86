//! # Detail Component
//!
//! Overlay showing a single item in full, followed by related items from
//! the same tab. While the single-item request is in flight the list
//! snapshot is shown with a loading note.
//!
//! The body can be longer than the overlay, so it is rendered into a
//! `ScrollView` whose offset lives in `DetailState`.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::content::ContentItem;
use crate::core::state::{DetailView, Loadable};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct DetailState {
    pub scroll: ScrollViewState,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, for a newly opened item.
    pub fn reset(&mut self) {
        self.scroll.scroll_to_top();
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum DetailEvent {
    Close,
}

impl EventHandler for DetailState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::Escape => return Some(DetailEvent::Close),
            TuiEvent::CursorUp => self.scroll.scroll_up(),
            TuiEvent::CursorDown => self.scroll.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll.scroll_page_down(),
            _ => {}
        }
        None
    }
}

pub struct DetailPanel<'a> {
    pub state: &'a mut DetailState,
    pub detail: &'a DetailView,
    pub related: Vec<&'a ContentItem>,
    pub show_status: bool,
}

impl DetailPanel<'_> {
    fn lines(&self) -> Vec<Line<'static>> {
        let item = self.detail.item();
        let label = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::new();

        if !item.description.is_empty() {
            lines.push(Line::from(Span::styled(
                item.description.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::default());
        }

        let mut meta = vec![
            Span::styled("Region: ", label),
            Span::styled(
                item.region.clone().unwrap_or_else(|| "Unknown".to_string()),
                Style::default().fg(Color::Cyan),
            ),
        ];
        if item.featured {
            meta.push(Span::styled("  ★ Featured", Style::default().fg(Color::Yellow)));
        }
        if self.show_status
            && let Some(status) = item.status
        {
            meta.push(Span::styled("  Status: ", label));
            meta.push(Span::raw(status.label()));
        }
        if let Some(created) = item.created_at {
            meta.push(Span::styled("  Added: ", label));
            meta.push(Span::raw(created.format("%Y-%m-%d").to_string()));
        }
        lines.push(Line::from(meta));

        if let Some(name) = item.credit() {
            lines.push(Line::from(vec![
                Span::styled("Shared by ", label),
                Span::raw(name.to_string()),
            ]));
        }

        match &self.detail.full {
            Loadable::Loading => lines.push(Line::from(Span::styled(
                "Loading full record...",
                Style::default().fg(Color::Yellow),
            ))),
            Loadable::Failed(message) => lines.push(Line::from(Span::styled(
                format!("⚠ {message}"),
                Style::default().fg(Color::Red),
            ))),
            _ => {}
        }

        lines.push(Line::default());
        for paragraph in item.content.lines() {
            lines.push(Line::from(paragraph.to_string()));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Related",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        if self.related.is_empty() {
            lines.push(Line::from(Span::styled("Nothing related yet.", label)));
        }
        for other in &self.related {
            let region = other.region.as_deref().map(|r| format!("  [{r}]")).unwrap_or_default();
            lines.push(Line::from(vec![
                Span::raw(format!("• {}", other.title)),
                Span::styled(region, label),
            ]));
        }
        lines
    }
}

impl Component for DetailPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(80, 80, area);
        frame.render_widget(Clear, popup);

        let item = self.detail.item();
        let block = Block::bordered()
            .title(format!(" {} {} ", item.kind.icon().glyph(), item.title))
            .title_bottom(Line::from(" ↑/↓ scroll · Esc back ").right_aligned())
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        if inner.width < 2 || inner.height == 0 {
            return;
        }

        // Leave a column for the scrollbar
        let width = inner.width - 1;
        let paragraph = Paragraph::new(self.lines()).wrap(Wrap { trim: false });
        let height = canvas_height(paragraph.line_count(width), inner.height);

        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never)
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, width, height));
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll);
    }
}

/// Scroll canvas height: the wrapped line count, at least the viewport.
fn canvas_height(lines: usize, viewport: u16) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX).max(viewport)
}
