//! Application state for the list browser
//!
//! Wraps a [`ListController`] with what only the terminal view needs:
//! the row cursor, scrolling, the active mode and the confirm dialog.

use crate::api;
use crate::list::{FetchTicket, ListController, PaginatedResult, Resource};
use crate::query::Navigator;
use crate::ui::output::{OutputWriter, StatusBarWriter};
use crate::ui::ratatui_adapter::widgets::ConfirmDialogState;
use std::time::Instant;

/// Current mode of the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing and typing into the search box
    #[default]
    Normal,
    /// Help overlay is visible
    Help,
    /// Delete confirmation is open
    Confirm,
}

/// State of one browser session
#[derive(Debug)]
pub struct BrowserState<R, N> {
    pub list: ListController<R, N>,
    /// Current row within the page
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Height of the visible item list area (set during render)
    pub visible_height: usize,
    pub mode: Mode,
    pub confirm_state: Option<ConfirmDialogState>,
    /// Transient notes such as "No more pages"
    pub status: StatusBarWriter,
    pub should_exit: bool,
}

impl<R: Resource, N: Navigator> BrowserState<R, N> {
    #[must_use]
    pub fn new(list: ListController<R, N>) -> Self {
        Self {
            list,
            cursor: 0,
            scroll_offset: 0,
            visible_height: 20,
            mode: Mode::Normal,
            confirm_state: None,
            status: StatusBarWriter::new(),
            should_exit: false,
        }
    }

    fn row_count(&self) -> usize {
        self.list.items().len()
    }

    /// Row under the cursor
    #[must_use]
    pub fn selected(&self) -> Option<&R> {
        self.list.items().get(self.cursor)
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.row_count() {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    pub fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    pub fn jump_to_end(&mut self) {
        self.cursor = self.row_count().saturating_sub(1);
        self.adjust_scroll();
    }

    /// Keep the cursor inside the viewport
    fn adjust_scroll(&mut self) {
        let height = self.visible_height.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Append a character to the search box
    pub fn query_push(&mut self, c: char, now: Instant) {
        let mut value = self.list.input_value().to_string();
        value.push(c);
        self.list.input_changed(value, now);
    }

    /// Remove the last character; `false` when the box was already empty
    pub fn query_backspace(&mut self, now: Instant) -> bool {
        let mut value = self.list.input_value().to_string();
        if value.pop().is_none() {
            return false;
        }
        self.list.input_changed(value, now);
        true
    }

    /// Remove the last word and the spaces after it
    pub fn query_delete_word(&mut self, now: Instant) -> bool {
        let value = self.list.input_value();
        if value.is_empty() {
            return false;
        }
        let trimmed = value.trim_end();
        let kept = trimmed.rfind(' ').map_or("", |space| &trimmed[..=space]);
        let kept = kept.to_string();
        self.list.input_changed(kept, now);
        true
    }

    pub fn query_clear(&mut self, now: Instant) -> bool {
        if self.list.input_value().is_empty() {
            return false;
        }
        self.list.input_changed(String::new(), now);
        true
    }

    /// Apply a finished fetch and reset the cursor when it went stale
    pub fn apply_fetch(&mut self, ticket: &FetchTicket, result: api::Result<PaginatedResult<R>>) -> bool {
        if !self.list.finish_fetch(ticket, result) {
            return false;
        }
        self.cursor = 0;
        self.scroll_offset = 0;
        true
    }

    /// Open the delete dialog for the row under the cursor
    pub fn request_delete(&mut self) -> bool {
        let Some(item) = self.selected() else {
            self.status.warning(&format!("No {} selected", R::LABEL.to_lowercase()));
            return false;
        };

        self.confirm_state = Some(ConfirmDialogState::delete(R::LABEL, item.id(), item.summary()));
        self.mode = Mode::Confirm;
        true
    }

    /// Close the dialog, returning it
    pub fn close_dialog(&mut self) -> Option<ConfirmDialogState> {
        self.mode = Mode::Normal;
        self.confirm_state.take()
    }

    /// Paging line for the status bar, e.g. `Page 2/5 · 47 total · unpaid`
    #[must_use]
    pub fn summary(&self) -> String {
        let query = self.list.query();
        let page = self.list.page();
        let mut text = format!(
            "Page {}/{} · {} total",
            query.page_index + 1,
            page.page_count(self.list.page_size()),
            page.total_count
        );
        if R::FILTERS_BY_STATUS {
            text.push_str(" · ");
            text.push_str(query.status.as_str());
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::query::{DebouncedInputBuffer, History, UrlSynchronizer};
    use serde_json::json;
    use std::time::Duration;

    fn state() -> BrowserState<Category, History> {
        BrowserState::new(ListController::new(
            UrlSynchronizer::new("/categories", History::new("/categories")),
            DebouncedInputBuffer::default(),
            10,
        ))
    }

    fn loaded(names: &[&str]) -> BrowserState<Category, History> {
        let mut state = state();
        let items = names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({ "categoryId": format!("c{i}"), "name": name }))
            .collect::<Vec<_>>();
        let ticket = state.list.begin_fetch();
        let page = PaginatedResult::from_bare(serde_json::from_value(json!(items)).unwrap());
        assert!(state.apply_fetch(&ticket, Ok(page)));
        state
    }

    #[test]
    fn test_cursor_stays_in_range() {
        let mut state = loaded(&["Jazz", "Rock", "Pop"]);
        state.cursor_up();
        assert_eq!(state.cursor, 0);

        state.jump_to_end();
        assert_eq!(state.cursor, 2);
        state.cursor_down();
        assert_eq!(state.cursor, 2);
        assert_eq!(state.selected().map(|c| c.name.as_str()), Some("Pop"));
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut state = loaded(&["a", "b", "c", "d", "e"]);
        state.visible_height = 2;
        state.cursor_down();
        state.cursor_down();
        assert_eq!(state.scroll_offset, 1);
        state.jump_to_start();
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_query_editing_feeds_buffer() {
        let now = Instant::now();
        let mut state = state();
        state.query_push('r', now);
        state.query_push('o', now);
        assert_eq!(state.list.input_value(), "ro");
        assert!(state.query_backspace(now));
        assert_eq!(state.list.input_value(), "r");
        assert!(state.query_clear(now));
        assert!(!state.query_backspace(now));
    }

    #[test]
    fn test_delete_word() {
        let now = Instant::now();
        let mut state = state();
        state.list.input_changed("summer jazz ", now);
        assert!(state.query_delete_word(now));
        assert_eq!(state.list.input_value(), "summer ");
        assert!(state.query_delete_word(now));
        assert_eq!(state.list.input_value(), "");
    }

    #[test]
    fn test_typing_commits_after_quiet_period() {
        let now = Instant::now();
        let mut state = state();
        state.query_push('j', now);
        let ticket = state.list.poll_input(now + Duration::from_millis(400)).unwrap();
        assert_eq!(ticket.query.search_text, "j");
        assert_eq!(state.list.location(), "/categories?q=j");
    }

    #[test]
    fn test_request_delete_opens_dialog() {
        let mut state = loaded(&["Jazz", "Rock"]);
        state.cursor_down();
        assert!(state.request_delete());
        assert_eq!(state.mode, Mode::Confirm);

        let dialog = state.close_dialog().unwrap();
        assert_eq!(dialog.target, "c1");
        assert_eq!(dialog.summary, "Rock");
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_request_delete_on_empty_list() {
        let mut state = state();
        assert!(!state.request_delete());
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(
            state.status.latest_message().map(|(_, text)| text),
            Some("No category selected".to_string())
        );
    }

    #[test]
    fn test_summary() {
        let state = loaded(&["Jazz", "Rock"]);
        assert_eq!(state.summary(), "Page 1/1 · 2 total");

        let mut orders: BrowserState<crate::models::Order, History> = BrowserState::new(ListController::new(
            UrlSynchronizer::new("/orders", History::new("/orders?page=3&status=unpaid")),
            DebouncedInputBuffer::default(),
            10,
        ));
        let ticket = orders.list.begin_fetch();
        let page = PaginatedResult {
            items: Vec::new(),
            total_count: 47,
            limit: 10,
            offset: 20,
            has_next: true,
            has_previous: true,
        };
        orders.apply_fetch(&ticket, Ok(page));
        assert_eq!(orders.summary(), "Page 3/5 · 47 total · unpaid");
    }

    #[test]
    fn test_stale_fetch_keeps_cursor() {
        let mut state = loaded(&["a", "b", "c"]);
        state.cursor_down();
        let stale = state.list.begin_fetch();
        let _current = state.list.begin_fetch();
        assert!(!state.apply_fetch(&stale, Ok(PaginatedResult::empty(10))));
        assert_eq!(state.cursor, 1);
    }
}
