//! Confirmation dialog widget for destructive actions
//!
//! A modal overlay that asks before a row is deleted on the server.

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Pending delete awaiting a yes or no
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialogState {
    /// Entity label, e.g. `Event`
    pub label: String,
    /// Id of the row to delete
    pub target: String,
    /// One line describing the row
    pub summary: String,
}

impl ConfirmDialogState {
    #[must_use]
    pub fn delete(
        label: impl Into<String>,
        target: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            summary: summary.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!(" Delete {} ", self.label)
    }

    #[must_use]
    pub fn question(&self) -> String {
        format!("Are you sure you want to delete this {}?", self.label.to_lowercase())
    }
}

/// Confirmation dialog overlay widget
pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    #[must_use]
    pub const fn new(state: &'a ConfirmDialogState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn centered(width: u16, height: u16, area: Rect) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    fn button(label: &'static str, bg: Color) -> Span<'static> {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Black)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = Self::centered(56, 9, area);
        Clear.render(modal, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.warning))
            .title(self.state.title())
            .title_alignment(Alignment::Center);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [question, summary, _, buttons, hint] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.state.question())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(self.theme.normal_style())
            .render(question, buf);

        Paragraph::new(self.state.summary.as_str())
            .alignment(Alignment::Center)
            .style(self.theme.dimmed_style())
            .render(summary, buf);

        Paragraph::new(Line::from(vec![
            Self::button(" [Y] Delete ", self.theme.error),
            Span::raw("    "),
            Self::button(" [N] Keep ", self.theme.success),
        ]))
        .alignment(Alignment::Center)
        .render(buttons, buf);

        Paragraph::new("Y/Enter: confirm | N/ESC: cancel")
            .alignment(Alignment::Center)
            .style(self.theme.dimmed_style())
            .render(hint, buf);
    }
}
