//! Content kind tabs, each labelled with its category icon.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Tabs;

use crate::core::content::ContentKind;
use crate::tui::component::Component;

pub struct KindTabs {
    pub selected: ContentKind,
}

impl KindTabs {
    pub fn titles() -> Vec<String> {
        ContentKind::ALL
            .iter()
            .map(|kind| format!("{} {}", kind.icon().glyph(), kind.label()))
            .collect()
    }
}

impl Component for KindTabs {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let tabs = Tabs::new(Self::titles().into_iter().map(Line::from))
            .select(self.selected.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│");
        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_titles_carry_icons() {
        let titles = KindTabs::titles();
        assert_eq!(titles.len(), 4);
        assert_eq!(titles[0], "📖 Stories");
        assert_eq!(titles[3], "🎨 Art");
    }

    #[test]
    fn test_render_all_labels() {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        let mut tabs = KindTabs {
            selected: ContentKind::Music,
        };
        terminal.draw(|f| tabs.render(f, f.area())).unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        for label in ["Stories", "Proverbs", "Music", "Art"] {
            assert!(text.contains(label), "missing {label} in {text:?}");
        }
    }
}
