//! Page retrieval for remote lists

use super::page::{ListResponse, PaginatedResult};
use super::resource::Resource;
use crate::api::{self, ApiClient, Transport};
use crate::query::StatusFilter;
use std::sync::Arc;

/// Rows requested per page unless configured otherwise
pub const PAGE_SIZE: u32 = 10;

/// Fetches pages of any [`Resource`] and normalizes the response
#[derive(Debug)]
pub struct ListFetcher<T> {
    client: Arc<ApiClient<T>>,
    page_size: u32,
}

impl<T> Clone for ListFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            page_size: self.page_size,
        }
    }
}

impl<T: Transport> ListFetcher<T> {
    #[must_use]
    pub const fn new(client: Arc<ApiClient<T>>) -> Self {
        Self {
            client,
            page_size: PAGE_SIZE,
        }
    }

    /// Override the page size; zero falls back to [`PAGE_SIZE`]
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = if page_size == 0 { PAGE_SIZE } else { page_size };
        self
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn client(&self) -> &Arc<ApiClient<T>> {
        &self.client
    }

    /// Fetch one page
    ///
    /// Sends `limit`, `offset = page_index * page_size` and `search` (only
    /// when non-empty). The status filter is applied locally, after the
    /// fetch; `total_count` keeps the server's unfiltered count.
    ///
    /// # Errors
    ///
    /// Propagates any [`api::ApiError`].
    pub async fn fetch_page<R: Resource>(
        &self,
        page_index: u32,
        search: &str,
        filter: StatusFilter,
    ) -> api::Result<PaginatedResult<R>> {
        let offset = page_index.saturating_mul(self.page_size);
        let mut query = vec![
            ("limit".to_string(), self.page_size.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        if !search.is_empty() {
            query.push(("search".to_string(), search.to_string()));
        }

        let response: ListResponse<R> = self.client.get(&R::list_path(), query).await?;
        let mut page = response.normalize(self.page_size, offset);

        if R::FILTERS_BY_STATUS && filter != StatusFilter::All {
            page.items.retain(|item| item.admits(filter));
        }

        log::debug!(
            "{} page {} -> {} of {}",
            R::PLURAL,
            page_index,
            page.items.len(),
            page.total_count
        );
        Ok(page)
    }

    /// Fetch the whole list without paging parameters
    ///
    /// # Errors
    ///
    /// Propagates any [`api::ApiError`].
    pub async fn fetch_all<R: Resource>(&self) -> api::Result<Vec<R>> {
        let response: ListResponse<R> = self.client.get(&R::list_path(), Vec::new()).await?;
        Ok(response.normalize(self.page_size, 0).items)
    }

    /// Fetch a single entity by id
    ///
    /// # Errors
    ///
    /// Propagates any [`api::ApiError`].
    pub async fn fetch_one<R: Resource>(&self, id: &str) -> api::Result<R> {
        self.client.get(&R::item_path(id), Vec::new()).await
    }
}
