//! Search term input and region selection, rendered from core state.
//!
//! The term itself lives in `App::filter`; this component only draws it.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

const PLACEHOLDER: &str = "Type to search titles, descriptions and content";

pub struct SearchBar<'a> {
    pub term: &'a str,
    pub region_label: &'a str,
    pub filter_active: bool,
    /// Whether to place the terminal cursor in the field.
    pub focused: bool,
}

impl Component for SearchBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.filter_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .title(" Search ")
            .title_top(Line::from(format!(" Region: {} (Tab) ", self.region_label)).right_aligned())
            .border_style(border_style);

        let inner = block.inner(area);

        let text = if self.term.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(self.term)
        };

        frame.render_widget(Paragraph::new(text).block(block), area);

        if self.focused && inner.width > 0 && inner.height > 0 {
            let offset = (self.term.width() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(bar: &mut SearchBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 3)).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let text = render(&mut SearchBar {
            term: "",
            region_label: "All Regions",
            filter_active: false,
            focused: true,
        });
        assert!(text.contains("Type to search"));
        assert!(text.contains("Region: All Regions"));
    }

    #[test]
    fn test_shows_term_and_region() {
        let text = render(&mut SearchBar {
            term: "inanga",
            region_label: "Western",
            filter_active: true,
            focused: false,
        });
        assert!(text.contains("inanga"));
        assert!(!text.contains("Type to search"));
        assert!(text.contains("Region: Western"));
    }
}
