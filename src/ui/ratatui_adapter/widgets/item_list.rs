//! Item list widget for the rows of the current page

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Rows of one page with a cursor indicator
pub struct ItemList<'a> {
    rows: &'a [String],
    cursor: usize,
    scroll_offset: usize,
    theme: &'a Theme,
    title: String,
    /// Shown when there are no rows
    placeholder: &'a str,
}

impl<'a> ItemList<'a> {
    #[must_use]
    pub fn new(rows: &'a [String], cursor: usize, scroll_offset: usize, theme: &'a Theme) -> Self {
        Self {
            rows,
            cursor,
            scroll_offset,
            theme,
            title: format!(" Items ({}) ", rows.len()),
            placeholder: "Nothing to show",
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    fn render_row(&self, row: &'a str, is_cursor: bool) -> ListItem<'a> {
        let cursor_char = if is_cursor { ">" } else { " " };
        let text_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        let line = Line::from(vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(row, text_style),
        ]);

        if is_cursor {
            ListItem::new(line).style(self.theme.selected_style())
        } else {
            ListItem::new(line)
        }
    }
}

impl Widget for ItemList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.rows.is_empty() {
            Paragraph::new(self.placeholder)
                .style(self.theme.dimmed_style())
                .render(inner, buf);
            return;
        }

        let rows = self.rows;
        let visible_height = inner.height as usize;
        let start = self.scroll_offset.min(rows.len());
        let end = (start + visible_height).min(rows.len());

        let items: Vec<ListItem> = rows[start..end]
            .iter()
            .enumerate()
            .map(|(offset, row)| self.render_row(row, start + offset == self.cursor))
            .collect();

        List::new(items).render(inner, buf);
    }
}
