//! Search bar widget for query input

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget that displays the query with cursor
pub struct SearchBar<'a> {
    /// Current, possibly uncommitted, query text
    query: &'a str,
    /// Location shown in the title
    location: &'a str,
    theme: &'a Theme,
    /// Whether a fetch is in flight
    loading: bool,
    focused: bool,
}

impl<'a> SearchBar<'a> {
    #[must_use]
    pub const fn new(query: &'a str, location: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            location,
            theme,
            loading: false,
            focused: true,
        }
    }

    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let title = if self.loading {
            format!(" {} (loading…) ", self.location)
        } else {
            format!(" {} ", self.location)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled("Search:", self.theme.dimmed_style()),
            Span::raw(" "),
            Span::raw(self.query),
            Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
