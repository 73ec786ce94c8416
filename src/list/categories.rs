//! Category lookup for event screens
//!
//! Event rows and forms need category names, and event drafts are checked
//! against the known categories before they are sent. One directory is
//! shared by every command of a run; it keeps the last fetched category
//! list in a short-lived cache and refetches `/category/all` only once the
//! entries have expired.

use super::fetcher::ListFetcher;
use crate::api::{self, Transport};
use crate::models::Category;
use moka::sync::Cache;
use std::time::Duration;

const DEFAULT_TTL: Duration = Duration::from_secs(300);
const MAX_CATEGORIES: u64 = 10_000;

/// Cached map of category id to category
#[derive(Clone)]
pub struct CategoryDirectory {
    cache: Cache<String, Category>,
}

impl std::fmt::Debug for CategoryDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryDirectory").finish_non_exhaustive()
    }
}

impl Default for CategoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(MAX_CATEGORIES)
            .build();
        Self { cache }
    }

    /// A directory whose entries never expire
    ///
    /// For views that resolve names synchronously and cannot reload, such
    /// as the browser's row labels.
    #[must_use]
    pub fn pinned() -> Self {
        Self {
            cache: Cache::builder().max_capacity(MAX_CATEGORIES).build(),
        }
    }

    /// Replace the cached entries with `categories`
    pub fn fill(&self, categories: impl IntoIterator<Item = Category>) {
        let mut fresh = std::collections::HashSet::new();
        for category in categories {
            fresh.insert(category.category_id.clone());
            self.cache.insert(category.category_id.clone(), category);
        }
        let stale: Vec<String> = self
            .cache
            .iter()
            .map(|(id, _)| id.as_ref().clone())
            .filter(|id| !fresh.contains(id))
            .collect();
        for id in stale {
            self.cache.invalidate(&id);
        }
    }

    /// Fetch every category and refill the cache
    ///
    /// # Errors
    ///
    /// Propagates the fetch error; the cache is left untouched.
    pub async fn load<T: Transport>(&self, fetcher: &ListFetcher<T>) -> api::Result<Vec<Category>> {
        let categories = fetcher.fetch_all::<Category>().await?;
        log::debug!("cached {} categories", categories.len());
        self.fill(categories.clone());
        Ok(categories)
    }

    /// Cached categories, fetched first when none are live
    ///
    /// # Errors
    ///
    /// Propagates the fetch error.
    pub async fn ensure_loaded<T: Transport>(&self, fetcher: &ListFetcher<T>) -> api::Result<Vec<Category>> {
        if self.cache.iter().next().is_some() {
            return Ok(self.all());
        }
        self.load(fetcher).await
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Category> {
        self.cache.get(id)
    }

    /// Display name for `id`, or `Unknown`
    #[must_use]
    pub fn name_of(&self, id: &str) -> String {
        self.get(id).map_or_else(|| "Unknown".to_string(), |c| c.name)
    }

    /// All cached categories, sorted by name
    #[must_use]
    pub fn all(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.cache.iter().map(|(_, c)| c).collect();
        categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        categories
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
