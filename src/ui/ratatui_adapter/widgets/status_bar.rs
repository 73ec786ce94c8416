//! Status bar widget for the banner and paging summary

use crate::ui::output::MessageLevel;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget: one message on the left, paging on the right
pub struct StatusBar<'a> {
    message: Option<(MessageLevel, &'a str)>,
    /// e.g. `Page 2/5 · 47 total`
    summary: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(message: Option<(MessageLevel, &'a str)>, summary: &'a str, theme: &'a Theme) -> Self {
        Self {
            message,
            summary,
            theme,
        }
    }

    /// Get prefix for a message level
    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).split(inner);

        if let Some((level, text)) = self.message {
            let style = self.theme.level_style(level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(level), style),
                Span::styled(text, style),
            ]);
            Paragraph::new(line).render(chunks[0], buf);
        }

        Paragraph::new(Line::styled(self.summary, self.theme.badge_style()))
            .alignment(Alignment::Right)
            .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_message_and_summary() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        StatusBar::new(
            Some((MessageLevel::Success, "Event created successfully")),
            "Page 1/3 · 25 total",
            &theme,
        )
        .render(area, &mut buf);

        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Event created successfully"));
        assert!(text.contains("25 total"));
    }
}
