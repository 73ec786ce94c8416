//! The single writer of a list's location

use super::history::Navigator;
use super::{QueryState, StatusFilter};

/// Builds canonical locations for one list path and reads state back
///
/// Nothing else mutates the navigator, so the location is always the
/// authoritative [`QueryState`].
#[derive(Debug, Clone)]
pub struct UrlSynchronizer<N> {
    path: String,
    navigator: N,
}

impl<N: Navigator> UrlSynchronizer<N> {
    #[must_use]
    pub fn new(path: impl Into<String>, navigator: N) -> Self {
        Self {
            path: path.into(),
            navigator,
        }
    }

    /// List path this synchronizer writes under
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current location string
    #[must_use]
    pub fn location(&self) -> &str {
        self.navigator.current()
    }

    #[must_use]
    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Navigate to the canonical location for `(query, page_index, filter)`
    ///
    /// Re-pushing the current location adds no history entry.
    pub fn update_url(&mut self, query: &str, page_index: u32, filter: StatusFilter) {
        let location = QueryState::new(query, page_index, filter).to_location(&self.path);
        if location != self.navigator.current() {
            log::debug!("navigate {location}");
            self.navigator.push(location);
        }
    }

    /// State encoded in the live location
    #[must_use]
    pub fn current_query_state(&self) -> QueryState {
        QueryState::from_location(self.navigator.current())
    }

    /// Step back in history; returns `false` at the oldest entry
    pub fn back(&mut self) -> bool {
        self.navigator.back()
    }

    /// Step forward in history; returns `false` at the newest entry
    pub fn forward(&mut self) -> bool {
        self.navigator.forward()
    }
}
