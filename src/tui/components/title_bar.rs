//! # TitleBar Component
//!
//! Top status line. Purely presentational: every field is a prop.
//!
//! The text changes based on state:
//!
//! 1. **Loading**: `"Umurage | Stories | Loading..."`
//! 2. **Loaded**: `"Umurage | Stories 2/40 | <status>"`
//! 3. **Admin**: adds `" | 3 pending · 35 approved · 2 rejected"`

use crate::core::filter::StatusCounts;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub kind_label: String,
    pub shown: usize,
    pub total: usize,
    pub status_message: String,
    pub is_loading: bool,
    /// Only set for the admin audience.
    pub counts: Option<StatusCounts>,
}

impl TitleBar {
    pub fn text(&self) -> String {
        let mut text = format!("Umurage | {}", self.kind_label);
        if self.is_loading {
            text.push_str(" | Loading...");
        } else {
            text.push_str(&format!(" {}/{}", self.shown, self.total));
            if !self.status_message.is_empty() {
                text.push_str(&format!(" | {}", self.status_message));
            }
        }
        if let Some(c) = self.counts {
            text.push_str(&format!(
                " | {} pending · {} approved · {} rejected",
                c.pending, c.approved, c.rejected
            ));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
