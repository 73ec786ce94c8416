//! Event handling for the list browser
//!
//! Maps key presses to state changes. Anything that needs the network is
//! returned to the run loop as an [`EventResult`] instead of being done here.

use super::state::{BrowserState, Mode};
use crate::list::{FetchTicket, Resource};
use crate::query::Navigator;
use crate::ui::output::OutputWriter;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::{Duration, Instant};

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Run this fetch and apply it with the ticket
    Fetch(FetchTicket),
    /// Delete the entity with this id; already confirmed
    Delete(String),
    /// Leave the browser
    Exit,
    /// No action taken
    Ignored,
}

impl From<Option<FetchTicket>> for EventResult {
    fn from(ticket: Option<FetchTicket>) -> Self {
        ticket.map_or(Self::Continue, Self::Fetch)
    }
}

/// Handle events in normal mode
fn handle_normal_mode<R: Resource, N: Navigator>(
    state: &mut BrowserState<R, N>,
    key: KeyEvent,
    now: Instant,
) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            state.should_exit = true;
            EventResult::Exit
        }

        // Rows
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
            state.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
            state.cursor_down();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            state.jump_to_start();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            state.jump_to_end();
            EventResult::Continue
        }
        (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::Delete, _) => {
            state.request_delete();
            EventResult::Continue
        }

        // Pages and history
        (KeyCode::PageDown, _) => match state.list.next_page() {
            Some(ticket) => EventResult::Fetch(ticket),
            None => {
                state.status.info("No more pages");
                EventResult::Continue
            }
        },
        (KeyCode::PageUp, _) => match state.list.prev_page() {
            Some(ticket) => EventResult::Fetch(ticket),
            None => {
                state.status.info("Already on the first page");
                EventResult::Continue
            }
        },
        (KeyCode::Left, KeyModifiers::ALT) => state.list.back().into(),
        (KeyCode::Right, KeyModifiers::ALT) => state.list.forward().into(),
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => EventResult::Fetch(state.list.refresh()),
        (KeyCode::Tab, _) if R::FILTERS_BY_STATUS => EventResult::Fetch(state.list.cycle_status()),

        (KeyCode::Char('x'), KeyModifiers::CONTROL) => {
            state.list.dismiss_banner();
            state.status.clear();
            EventResult::Continue
        }
        (KeyCode::F(1), _) => {
            state.mode = Mode::Help;
            EventResult::Continue
        }

        // Search editing
        (KeyCode::Enter, _) => {
            let text = state.list.input_value().to_string();
            state.list.commit_search(&text).into()
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c, now);
            EventResult::Continue
        }
        (KeyCode::Backspace, _) => {
            if state.query_backspace(now) {
                EventResult::Continue
            } else {
                EventResult::Ignored
            }
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            if state.query_clear(now) {
                EventResult::Continue
            } else {
                EventResult::Ignored
            }
        }
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
            if state.query_delete_word(now) {
                EventResult::Continue
            } else {
                EventResult::Ignored
            }
        }

        _ => EventResult::Ignored,
    }
}

/// Handle events in help mode
fn handle_help_mode<R, N>(state: &mut BrowserState<R, N>) -> EventResult {
    // Any key closes help
    state.mode = Mode::Normal;
    EventResult::Continue
}

/// Handle events in confirm mode
fn handle_confirm_mode<R: Resource, N: Navigator>(
    state: &mut BrowserState<R, N>,
    key: KeyEvent,
) -> EventResult {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
            state
                .close_dialog()
                .map_or(EventResult::Continue, |dialog| EventResult::Delete(dialog.target))
        }
        KeyCode::Char('n' | 'N') | KeyCode::Esc => {
            state.close_dialog();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle one key press
pub fn handle_key<R: Resource, N: Navigator>(
    state: &mut BrowserState<R, N>,
    key: KeyEvent,
    now: Instant,
) -> EventResult {
    match state.mode {
        Mode::Normal => handle_normal_mode(state, key, now),
        Mode::Help => handle_help_mode(state),
        Mode::Confirm => handle_confirm_mode(state, key),
    }
}

/// Wait up to `timeout` for an event and handle it
///
/// # Errors
///
/// Returns an error if reading from the terminal fails.
pub fn poll_and_handle<R: Resource, N: Navigator>(
    state: &mut BrowserState<R, N>,
    timeout: Duration,
) -> io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Ignored);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(state, key, Instant::now())),
        Event::Resize(_, _) => Ok(EventResult::Continue),
        _ => Ok(EventResult::Ignored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{ListController, PaginatedResult};
    use crate::models::{Category, Order};
    use crate::query::{DebouncedInputBuffer, History, StatusFilter, UrlSynchronizer};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn browser<R: Resource>(path: &str) -> BrowserState<R, History> {
        BrowserState::new(ListController::new(
            UrlSynchronizer::new(path, History::new(path)),
            DebouncedInputBuffer::default(),
            10,
        ))
    }

    fn loaded_categories() -> BrowserState<Category, History> {
        let mut state = browser::<Category>("/categories");
        let ticket = state.list.begin_fetch();
        let items = serde_json::from_value(json!([
            { "categoryId": "c1", "name": "Jazz" },
            { "categoryId": "c2", "name": "Rock" }
        ]))
        .unwrap();
        state.apply_fetch(&ticket, Ok(PaginatedResult::from_bare(items)));
        state
    }

    #[test]
    fn test_escape_exits() {
        let mut state = browser::<Category>("/categories");
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc), Instant::now()), EventResult::Exit);
        assert!(state.should_exit);
    }

    #[test]
    fn test_typing_is_buffered() {
        let mut state = browser::<Category>("/categories");
        let now = Instant::now();
        handle_key(&mut state, key(KeyCode::Char('j')), now);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT), now);
        assert_eq!(state.list.input_value(), "jA");
        assert_eq!(state.list.location(), "/categories");
    }

    #[test]
    fn test_enter_commits_immediately() {
        let mut state = browser::<Category>("/categories");
        handle_key(&mut state, key(KeyCode::Char('j')), Instant::now());
        let result = handle_key(&mut state, key(KeyCode::Enter), Instant::now());
        assert!(matches!(result, EventResult::Fetch(ticket) if ticket.query.search_text == "j"));
        assert_eq!(state.list.location(), "/categories?q=j");
    }

    #[test]
    fn test_page_down_without_more_pages() {
        let mut state = loaded_categories();
        let result = handle_key(&mut state, key(KeyCode::PageDown), Instant::now());
        assert_eq!(result, EventResult::Continue);
        assert_eq!(
            state.status.latest_message().map(|(_, text)| text),
            Some("No more pages".to_string())
        );
    }

    #[test]
    fn test_tab_cycles_status_for_orders_only() {
        let mut orders = browser::<Order>("/orders");
        let result = handle_key(&mut orders, key(KeyCode::Tab), Instant::now());
        assert!(matches!(result, EventResult::Fetch(ticket) if ticket.query.status == StatusFilter::Paid));
        assert_eq!(orders.list.location(), "/orders?status=paid");

        let mut categories = browser::<Category>("/categories");
        assert_eq!(
            handle_key(&mut categories, key(KeyCode::Tab), Instant::now()),
            EventResult::Ignored
        );
    }

    #[test]
    fn test_history_navigation() {
        let mut state = browser::<Category>("/categories");
        state.list.commit_search("jazz");

        let back = handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Left, KeyModifiers::ALT),
            Instant::now(),
        );
        assert!(matches!(back, EventResult::Fetch(ticket) if ticket.query.search_text.is_empty()));
        let forward = handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Right, KeyModifiers::ALT),
            Instant::now(),
        );
        assert!(matches!(forward, EventResult::Fetch(ticket) if ticket.query.search_text == "jazz"));
    }

    #[test]
    fn test_delete_flow() {
        let mut state = loaded_categories();
        handle_key(&mut state, key(KeyCode::Down), Instant::now());
        handle_key(&mut state, ctrl('d'), Instant::now());
        assert_eq!(state.mode, Mode::Confirm);

        let result = handle_key(&mut state, key(KeyCode::Char('y')), Instant::now());
        assert_eq!(result, EventResult::Delete("c2".to_string()));
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_delete_declined() {
        let mut state = loaded_categories();
        handle_key(&mut state, ctrl('d'), Instant::now());
        let result = handle_key(&mut state, key(KeyCode::Esc), Instant::now());
        assert_eq!(result, EventResult::Continue);
        assert!(state.confirm_state.is_none());
        assert!(!state.should_exit);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut state = browser::<Category>("/categories");
        handle_key(&mut state, key(KeyCode::F(1)), Instant::now());
        assert_eq!(state.mode, Mode::Help);
        handle_key(&mut state, key(KeyCode::Char('q')), Instant::now());
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.list.input_value(), "");
    }

    #[test]
    fn test_refresh_issues_ticket() {
        let mut state = browser::<Category>("/categories");
        let result = handle_key(&mut state, ctrl('r'), Instant::now());
        assert!(matches!(result, EventResult::Fetch(ticket) if ticket.seq == 1));
        assert!(state.list.is_loading());
    }
}
