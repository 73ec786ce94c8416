//! Help overlay widget for displaying full keybind reference

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Help overlay widget that displays a centered help screen
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
    /// Include the status filter binding
    filters_by_status: bool,
}

impl<'a> HelpOverlay<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            filters_by_status: false,
        }
    }

    #[must_use]
    pub const fn filters_by_status(mut self, filters_by_status: bool) -> Self {
        self.filters_by_status = filters_by_status;
        self
    }

    /// Calculate centered area for the overlay
    fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
        let popup_layout = Layout::vertical([
            Constraint::Percentage((100 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100 - height_percent) / 2),
        ])
        .split(area);

        Layout::horizontal([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(popup_layout[1])[1]
    }

    fn heading(&self, title: &'static str) -> Line<'static> {
        Line::styled(title, self.theme.cursor_style().add_modifier(Modifier::UNDERLINED))
    }

    fn help_line(&self, key: &'static str, desc: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {key:<14}"), self.theme.cursor_style()),
            Span::raw(desc),
        ])
    }

    fn build_content(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::default(),
            self.heading("  Rows"),
            Line::default(),
            self.help_line("↑/↓", "Move cursor"),
            self.help_line("Home/End", "First/last row"),
            self.help_line("Ctrl+D", "Delete row"),
            Line::default(),
            self.heading("  Pages"),
            Line::default(),
            self.help_line("PgUp/PgDn", "Previous/next page"),
            self.help_line("Alt+←/Alt+→", "Back/forward"),
            self.help_line("Ctrl+R", "Reload"),
        ];
        if self.filters_by_status {
            lines.push(self.help_line("TAB", "Cycle all/paid/unpaid"));
        }
        lines.extend([
            Line::default(),
            self.heading("  Search"),
            Line::default(),
            self.help_line("Type", "Search (applied after a pause)"),
            self.help_line("Ctrl+U", "Clear search"),
            self.help_line("Ctrl+W", "Delete word"),
            self.help_line("Ctrl+X", "Dismiss message"),
            Line::default(),
            Line::styled("  Press any key to close", self.theme.dimmed_style()),
            Line::default(),
        ]);
        lines
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = Self::centered_rect(60, 80, area);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Help ")
            .title_alignment(Alignment::Center);

        Paragraph::new(self.build_content()).block(block).render(popup_area, buf);
    }
}
