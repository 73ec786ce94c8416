//! Terminal list browser
//!
//! The event loop runs on the calling thread. Fetches and deletes are
//! spawned on a tokio runtime and report back over a channel; results are
//! applied through the controller's tickets, so a reply for a query the
//! user has already moved past is dropped.

use super::events::{EventResult, poll_and_handle};
use super::state::{BrowserState, Mode};
use super::theme::Theme;
use super::widgets::{ConfirmDialog, HelpBar, HelpOverlay, ItemList, KeyHint, SearchBar, StatusBar};
use crate::api::{self, ApiClient, Transport};
use crate::list::{
    AutoConfirm, FetchTicket, ListController, ListFetcher, MutationCoordinator, MutationError,
    MutationKind, MutationOutcome, PaginatedResult, Resource,
};
use crate::query::{DEFAULT_DEBOUNCE, DebouncedInputBuffer, History, Navigator, UrlSynchronizer};
use crate::ui::error::{Result, UiError};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};

/// Work finished on the runtime
#[derive(Debug)]
enum Message<R> {
    Fetched(FetchTicket, api::Result<PaginatedResult<R>>),
    Removed(std::result::Result<MutationOutcome, MutationError>),
}

/// Interactive browser for one list
#[derive(Debug, Clone)]
pub struct ListBrowser {
    theme: Theme,
    page_size: u32,
    debounce: Duration,
    min_search_len: usize,
    tick: Duration,
}

impl Default for ListBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl ListBrowser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            theme: Theme::dark(),
            page_size: crate::list::PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            min_search_len: 0,
            tick: Duration::from_millis(50),
        }
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Quiet period and minimum length for search commits
    #[must_use]
    pub const fn with_search(mut self, debounce: Duration, min_len: usize) -> Self {
        self.debounce = debounce;
        self.min_search_len = min_len;
        self
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Browse the list of `R` starting at `location`
    ///
    /// `label` renders one row. Must not be called from inside the runtime
    /// that `handle` points to.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be driven.
    pub fn run<T, R>(
        &self,
        handle: &Handle,
        client: Arc<ApiClient<T>>,
        location: &str,
        label: impl Fn(&R) -> String,
    ) -> Result<()>
    where
        T: Transport + 'static,
        R: Resource,
    {
        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal, handle, client, location, &label);

        if let Err(e) = Self::cleanup_terminal() {
            log::warn!("terminal cleanup failed: {e}");
        }

        result
    }

    fn run_loop<T, R>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        handle: &Handle,
        client: Arc<ApiClient<T>>,
        location: &str,
        label: &impl Fn(&R) -> String,
    ) -> Result<()>
    where
        T: Transport + 'static,
        R: Resource,
    {
        let fetcher = ListFetcher::new(Arc::clone(&client)).with_page_size(self.page_size);
        let mutations = MutationCoordinator::new(client);
        let input = DebouncedInputBuffer::new(self.debounce).with_min_len(self.min_search_len);
        let sync = UrlSynchronizer::new(R::location_path(), History::new(location));
        let mut state = BrowserState::new(ListController::<R, _>::new(sync, input, fetcher.page_size()));
        let hints = HelpBar::default_hints(R::FILTERS_BY_STATUS);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = Worker {
            handle,
            fetcher: &fetcher,
            mutations: &mutations,
            tx: &tx,
        };

        worker.fetch(state.list.refresh());

        loop {
            for ticket in Self::drain(&mut rx, &mut state)? {
                worker.fetch(ticket);
            }
            if let Some(ticket) = state.list.poll_input(Instant::now()) {
                worker.fetch(ticket);
            }

            let rows: Vec<String> = state.list.items().iter().map(label).collect();
            terminal.draw(|frame| self.render(frame, &mut state, &rows, &hints))?;

            match poll_and_handle(&mut state, self.tick)? {
                EventResult::Fetch(ticket) => worker.fetch(ticket),
                EventResult::Delete(id) => worker.remove(id),
                EventResult::Exit => break,
                EventResult::Continue | EventResult::Ignored => {}
            }

            if state.should_exit {
                break;
            }
        }

        Ok(())
    }

    /// Apply everything that has finished; returns follow-up fetches
    fn drain<R: Resource, N: Navigator>(
        rx: &mut UnboundedReceiver<Message<R>>,
        state: &mut BrowserState<R, N>,
    ) -> Result<Vec<FetchTicket>> {
        let mut follow_ups = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(Message::Fetched(ticket, result)) => {
                    state.apply_fetch(&ticket, result);
                }
                Ok(Message::Removed(result)) => {
                    follow_ups.extend(state.list.settle_mutation(MutationKind::Remove, &result));
                }
                Err(TryRecvError::Empty) => return Ok(follow_ups),
                Err(TryRecvError::Disconnected) => return Err(UiError::InterruptedError),
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render<R: Resource, N: Navigator>(
        &self,
        frame: &mut Frame,
        state: &mut BrowserState<R, N>,
        rows: &[String],
        hints: &[KeyHint],
    ) {
        let theme = &self.theme;
        let area = frame.area();

        // Search bar, list borders, status bar and help line
        state.visible_height = area.height.saturating_sub(9) as usize;

        let main_layout = Layout::vertical([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Rows
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let search_bar = SearchBar::new(state.list.input_value(), state.list.location(), theme)
            .loading(state.list.is_loading())
            .focused(state.mode == Mode::Normal);
        frame.render_widget(search_bar, main_layout[0]);

        let placeholder = if state.list.is_loading() {
            "Loading…".to_string()
        } else {
            format!("No {} found", R::PLURAL)
        };
        let title = format!(" {} ({}) ", R::PLURAL, rows.len());
        let list = ItemList::new(rows, state.cursor, state.scroll_offset, theme)
            .title(title)
            .placeholder(&placeholder);
        frame.render_widget(list, main_layout[1]);

        let latest = state.status.latest_message();
        let message = state
            .list
            .banner()
            .map(|banner| (banner.level, banner.text.as_str()))
            .or_else(|| latest.as_ref().map(|(level, text)| (*level, text.as_str())));
        let summary = state.summary();
        frame.render_widget(StatusBar::new(message, &summary, theme), main_layout[2]);

        frame.render_widget(HelpBar::new(hints, theme), main_layout[3]);

        match state.mode {
            Mode::Help => {
                frame.render_widget(HelpOverlay::new(theme).filters_by_status(R::FILTERS_BY_STATUS), area);
            }
            Mode::Confirm => {
                if let Some(dialog) = &state.confirm_state {
                    frame.render_widget(ConfirmDialog::new(dialog, theme), area);
                }
            }
            Mode::Normal => {}
        }
    }
}

/// Spawns network work for the browser
struct Worker<'a, T, R> {
    handle: &'a Handle,
    fetcher: &'a ListFetcher<T>,
    mutations: &'a MutationCoordinator<T>,
    tx: &'a UnboundedSender<Message<R>>,
}

impl<T: Transport + 'static, R: Resource> Worker<'_, T, R> {
    fn fetch(&self, ticket: FetchTicket) {
        let fetcher = self.fetcher.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let query = &ticket.query;
            let result = fetcher
                .fetch_page::<R>(query.page_index, &query.search_text, query.status)
                .await;
            if tx.send(Message::Fetched(ticket, result)).is_err() {
                log::debug!("browser closed before fetch completed");
            }
        });
    }

    /// Delete `id`; the in-browser dialog already asked
    fn remove(&self, id: String) {
        let mutations = self.mutations.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let result = mutations.remove::<R, _>(&id, &AutoConfirm::yes()).await;
            if tx.send(Message::Removed(result)).is_err() {
                log::debug!("browser closed before delete of {id} completed");
            }
        });
    }
}
