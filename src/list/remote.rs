//! A list view wired to the API
//!
//! `RemoteList` runs a [`ListController`] against a [`ListFetcher`] and a
//! [`MutationCoordinator`], awaiting each fetch inline. It is what the CLI
//! commands drive; the terminal browser uses the controller directly so it
//! can keep rendering while requests are in flight.

use super::controller::{FetchTicket, ListController};
use super::fetcher::ListFetcher;
use super::mutation::{Confirmer, MutationCoordinator, MutationError, MutationKind, MutationOutcome, MutationReceipt};
use super::page::PaginatedResult;
use super::resource::Resource;
use crate::api::{ApiClient, Transport};
use crate::query::{DebouncedInputBuffer, Navigator, StatusFilter, UrlSynchronizer};
use std::sync::Arc;
use std::time::Instant;

/// Remote list of one resource type
#[derive(Debug)]
pub struct RemoteList<T, R, N> {
    fetcher: ListFetcher<T>,
    mutations: MutationCoordinator<T>,
    controller: ListController<R, N>,
}

impl<T, R, N> RemoteList<T, R, N>
where
    T: Transport,
    R: Resource,
    N: Navigator,
{
    #[must_use]
    pub fn new(client: Arc<ApiClient<T>>, navigator: N, input: DebouncedInputBuffer, page_size: u32) -> Self {
        let fetcher = ListFetcher::new(Arc::clone(&client)).with_page_size(page_size);
        let sync = UrlSynchronizer::new(R::location_path(), navigator);
        let controller = ListController::new(sync, input, fetcher.page_size());
        Self {
            fetcher,
            mutations: MutationCoordinator::new(client),
            controller,
        }
    }

    #[must_use]
    pub const fn controller(&self) -> &ListController<R, N> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ListController<R, N> {
        &mut self.controller
    }

    #[must_use]
    pub const fn fetcher(&self) -> &ListFetcher<T> {
        &self.fetcher
    }

    #[must_use]
    pub fn items(&self) -> &[R] {
        self.controller.items()
    }

    #[must_use]
    pub const fn page(&self) -> &PaginatedResult<R> {
        self.controller.page()
    }

    async fn run(&mut self, ticket: FetchTicket) {
        let query = &ticket.query;
        let result = self
            .fetcher
            .fetch_page::<R>(query.page_index, &query.search_text, query.status)
            .await;
        self.controller.finish_fetch(&ticket, result);
    }

    async fn run_opt(&mut self, ticket: Option<FetchTicket>) -> bool {
        match ticket {
            Some(ticket) => {
                self.run(ticket).await;
                true
            }
            None => false,
        }
    }

    /// Fetch the current location
    pub async fn load(&mut self) {
        let ticket = self.controller.refresh();
        self.run(ticket).await;
    }

    /// Record a keystroke without fetching
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.controller.input_changed(value, now);
    }

    /// Fetch if the debounce window has closed; `true` when a fetch ran
    pub async fn poll(&mut self, now: Instant) -> bool {
        let ticket = self.controller.poll_input(now);
        self.run_opt(ticket).await
    }

    /// Commit `text` immediately, bypassing the debounce
    pub async fn search(&mut self, text: &str) -> bool {
        let ticket = self.controller.commit_search(text);
        self.run_opt(ticket).await
    }

    pub async fn go_to_page(&mut self, page_index: u32) {
        let ticket = self.controller.go_to_page(page_index);
        self.run(ticket).await;
    }

    pub async fn next_page(&mut self) -> bool {
        let ticket = self.controller.next_page();
        self.run_opt(ticket).await
    }

    pub async fn prev_page(&mut self) -> bool {
        let ticket = self.controller.prev_page();
        self.run_opt(ticket).await
    }

    pub async fn set_status(&mut self, status: StatusFilter) {
        let ticket = self.controller.set_status(status);
        self.run(ticket).await;
    }

    pub async fn back(&mut self) -> bool {
        let ticket = self.controller.back();
        self.run_opt(ticket).await
    }

    pub async fn forward(&mut self) -> bool {
        let ticket = self.controller.forward();
        self.run_opt(ticket).await
    }

    /// Create an entity and reload the first page on success
    ///
    /// # Errors
    ///
    /// Returns the [`MutationError`]; the banner is set either way.
    pub async fn create(&mut self, draft: &R::Draft) -> Result<MutationReceipt, MutationError> {
        let result = self.mutations.create::<R>(draft).await;
        let ticket = self.controller.settle_mutation(MutationKind::Create, &result);
        self.run_opt(ticket).await;
        result
    }

    /// Update an entity and reload the first page on success
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update(&mut self, id: &str, draft: &R::Draft) -> Result<MutationReceipt, MutationError> {
        let result = self.mutations.update::<R>(id, draft).await;
        let ticket = self.controller.settle_mutation(MutationKind::Update, &result);
        self.run_opt(ticket).await;
        result
    }

    /// Delete an entity after confirmation and reload the first page
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`]. Declining yields `Ok(Declined)`.
    pub async fn remove<C: Confirmer + ?Sized>(
        &mut self,
        id: &str,
        confirmer: &C,
    ) -> Result<MutationOutcome, MutationError> {
        let result = self.mutations.remove::<R, C>(id, confirmer).await;
        let ticket = self.controller.settle_mutation(MutationKind::Remove, &result);
        self.run_opt(ticket).await;
        result
    }
}
