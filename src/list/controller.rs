//! State machine for one list view
//!
//! `ListController` performs no I/O. Callers ask it for a [`FetchTicket`],
//! run the fetch however they like (inline in the CLI, on a spawned task
//! in the browser) and hand the result back through
//! [`ListController::finish_fetch`]. Each ticket carries a sequence number;
//! only the most recently issued ticket may change what the list shows, so
//! a slow response for an old query can never overwrite a newer one.
//!
//! ```text
//! Idle ──begin_fetch──▶ Loading ──finish_fetch(Ok)──▶ Loaded
//!                          │
//!                          └──finish_fetch(Err)─▶ Failed (list cleared, banner)
//! ```

use super::mutation::{MutationError, MutationKind, MutationOutcome};
use super::page::PaginatedResult;
use super::resource::Resource;
use crate::api;
use crate::query::{DebouncedInputBuffer, Navigator, QueryState, StatusFilter, UrlSynchronizer};
use crate::ui::output::MessageLevel;
use std::time::Instant;

/// Fetch lifecycle of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Dismissible notification shown above a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub level: MessageLevel,
    pub text: String,
}

impl Banner {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            text: text.into(),
        }
    }
}

/// Permission to apply one fetch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: QueryState,
}

/// Query, paging and notification state of one list view
#[derive(Debug)]
pub struct ListController<R, N> {
    sync: UrlSynchronizer<N>,
    input: DebouncedInputBuffer,
    page: PaginatedResult<R>,
    state: LoadState,
    banner: Option<Banner>,
    latest_seq: u64,
    page_size: u32,
}

impl<R: Resource, N: Navigator> ListController<R, N> {
    /// Build a controller; the input buffer starts with the location's search
    #[must_use]
    pub fn new(sync: UrlSynchronizer<N>, mut input: DebouncedInputBuffer, page_size: u32) -> Self {
        input.sync_from(sync.current_query_state().search_text);
        Self {
            sync,
            input,
            page: PaginatedResult::empty(page_size),
            state: LoadState::Idle,
            banner: None,
            latest_seq: 0,
            page_size,
        }
    }

    /// State encoded in the current location
    #[must_use]
    pub fn query(&self) -> QueryState {
        self.sync.current_query_state()
    }

    #[must_use]
    pub fn location(&self) -> &str {
        self.sync.location()
    }

    #[must_use]
    pub const fn synchronizer(&self) -> &UrlSynchronizer<N> {
        &self.sync
    }

    #[must_use]
    pub fn items(&self) -> &[R] {
        &self.page.items
    }

    #[must_use]
    pub const fn page(&self) -> &PaginatedResult<R> {
        &self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    #[must_use]
    pub const fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Remove and return the banner
    pub fn take_banner(&mut self) -> Option<Banner> {
        self.banner.take()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Uncommitted search text
    #[must_use]
    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    #[must_use]
    pub const fn input(&self) -> &DebouncedInputBuffer {
        &self.input
    }

    /// Sequence number of the newest ticket
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Issue a ticket for the current location and enter `Loading`
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.state = LoadState::Loading;
        FetchTicket {
            seq: self.latest_seq,
            query: self.query(),
        }
    }

    /// Apply a fetch result if its ticket is still the newest
    ///
    /// Returns `false` when the result was stale and discarded.
    pub fn finish_fetch(&mut self, ticket: &FetchTicket, result: api::Result<PaginatedResult<R>>) -> bool {
        if ticket.seq != self.latest_seq {
            log::debug!(
                "discarding stale {} response #{} (latest #{})",
                R::PLURAL,
                ticket.seq,
                self.latest_seq
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.page = page;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                log::warn!("loading {} failed: {err}", R::PLURAL);
                self.page = PaginatedResult::empty(self.page_size);
                self.state = LoadState::Failed;
                self.banner = Some(Banner::error(
                    err.message_or(&format!("Failed to load {}", R::PLURAL)),
                ));
            }
        }
        true
    }

    /// Record a keystroke; the commit happens later through [`Self::poll_input`]
    pub fn input_changed(&mut self, value: impl Into<String>, now: Instant) {
        self.input.input(value, now);
    }

    /// Commit the search once the quiet period has passed
    pub fn poll_input(&mut self, now: Instant) -> Option<FetchTicket> {
        let committed = self.input.poll(now)?;
        self.commit_search(&committed)
    }

    /// Navigate to page 0 of `text`; `None` when the location is unchanged
    pub fn commit_search(&mut self, text: &str) -> Option<FetchTicket> {
        self.input.sync_from(text);
        let before = self.query();
        self.sync.update_url(text, 0, before.status);
        if self.query() == before && self.state != LoadState::Idle {
            return None;
        }
        Some(self.begin_fetch())
    }

    /// Jump to `page_index` with the committed search and status
    pub fn go_to_page(&mut self, page_index: u32) -> FetchTicket {
        let query = self.query();
        self.sync.update_url(&query.search_text, page_index, query.status);
        self.begin_fetch()
    }

    /// Next page, if the server reported one
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let query = self.query();
        let has_more = self.page.has_next
            || u64::from(query.page_index) + 1 < self.page.page_count(self.page_size);
        has_more.then(|| self.go_to_page(query.page_index + 1))
    }

    /// Previous page, unless already on the first
    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        let query = self.query();
        (query.page_index > 0).then(|| self.go_to_page(query.page_index - 1))
    }

    /// Switch the status filter and return to the first page
    pub fn set_status(&mut self, status: StatusFilter) -> FetchTicket {
        let query = self.query();
        self.sync.update_url(&query.search_text, 0, status);
        self.begin_fetch()
    }

    pub fn cycle_status(&mut self) -> FetchTicket {
        let next = self.query().status.cycle();
        self.set_status(next)
    }

    /// Refetch the current location
    pub fn refresh(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Step back in history and refetch
    pub fn back(&mut self) -> Option<FetchTicket> {
        if !self.sync.back() {
            return None;
        }
        self.input.sync_from(self.query().search_text);
        Some(self.begin_fetch())
    }

    /// Step forward in history and refetch
    pub fn forward(&mut self) -> Option<FetchTicket> {
        if !self.sync.forward() {
            return None;
        }
        self.input.sync_from(self.query().search_text);
        Some(self.begin_fetch())
    }

    /// React to a finished mutation
    ///
    /// Success shows a banner, resets the location to page 0 of the current
    /// search and status, and returns the ticket for the page-0 fetch.
    /// Failure shows the error and leaves the list alone. A declined
    /// confirmation changes nothing.
    pub fn settle_mutation<V>(
        &mut self,
        kind: MutationKind,
        result: &Result<V, MutationError>,
    ) -> Option<FetchTicket>
    where
        V: Into<MutationOutcome> + Clone,
    {
        match result {
            Ok(value) => match value.clone().into() {
                MutationOutcome::Declined => None,
                MutationOutcome::Applied(_) => {
                    self.banner = Some(Banner::success(kind.success_message::<R>()));
                    let QueryState {
                        search_text,
                        status,
                        ..
                    } = self.query();
                    self.input.sync_from(search_text.as_str());
                    self.sync.update_url(&search_text, 0, status);
                    Some(self.begin_fetch())
                }
            },
            Err(err) => {
                self.banner = Some(Banner::error(err.message_or(&kind.fallback_message::<R>())));
                None
            }
        }
    }
}
