//! List query state and its location encoding
//!
//! Every list view is addressed by a location such as
//! `/orders?q=jazz&page=2&status=unpaid`. The location is the single
//! source of truth for what a list shows: [`QueryState`] is always derived
//! from it, and only [`UrlSynchronizer`] writes it.
//!
//! # Encoding
//!
//! | field         | parameter | default (omitted) |
//! |---------------|-----------|-------------------|
//! | `search_text` | `q`       | empty             |
//! | `page_index`  | `page`    | 0 (written 1-based) |
//! | `status`      | `status`  | `all`             |

mod debounce;
mod history;
mod sync;

pub use debounce::{DEFAULT_DEBOUNCE, DebouncedInputBuffer};
pub use history::{History, Navigator};
pub use sync::UrlSynchronizer;

use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// Base used to resolve relative locations; never shown to the user
const LOCATION_BASE: &str = "http://boxoffice.local/";

fn resolve(location: &str) -> Option<Url> {
    Url::parse(LOCATION_BASE).ok()?.join(location).ok()
}

/// Payment status filter for the orders list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Unpaid,
}

impl StatusFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
        }
    }

    /// Next filter in `all → paid → unpaid → all` order
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::All => Self::Paid,
            Self::Paid => Self::Unpaid,
            Self::Unpaid => Self::All,
        }
    }

    /// Whether an order with the given payment flag passes the filter
    #[must_use]
    pub const fn admits(self, paid: bool) -> bool {
        match self {
            Self::All => true,
            Self::Paid => paid,
            Self::Unpaid => !paid,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "paid" => Ok(Self::Paid),
            "unpaid" | "pending" => Ok(Self::Unpaid),
            other => Err(format!("unknown status filter '{other}' (expected all, paid or unpaid)")),
        }
    }
}

/// What a list view is currently showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    pub search_text: String,
    /// Zero-based page index
    pub page_index: u32,
    pub status: StatusFilter,
}

impl QueryState {
    #[must_use]
    pub fn new(search_text: impl Into<String>, page_index: u32, status: StatusFilter) -> Self {
        Self {
            search_text: search_text.into(),
            page_index,
            status,
        }
    }

    /// Canonical location for this state under `path`
    ///
    /// Default values are omitted, so the default state is the bare path.
    #[must_use]
    pub fn to_location(&self, path: &str) -> String {
        let Some(mut url) = resolve(path) else {
            return path.to_string();
        };
        url.set_query(None);

        let mut params: Vec<(&str, String)> = Vec::new();
        if !self.search_text.is_empty() {
            params.push(("q", self.search_text.clone()));
        }
        if self.page_index > 0 {
            params.push(("page", (u64::from(self.page_index) + 1).to_string()));
        }
        if self.status != StatusFilter::All {
            params.push(("status", self.status.as_str().to_string()));
        }

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }

    /// Read a state back from a location
    ///
    /// Missing parameters take their defaults. `page` is clamped with
    /// `max(0, page - 1)`; a non-numeric page reads as 0 and an unknown
    /// status reads as `all`.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        let Some(url) = resolve(location) else {
            return Self::default();
        };

        let mut state = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "q" => state.search_text = value.into_owned(),
                "page" => state.page_index = parse_page(&value),
                "status" => state.status = value.parse().unwrap_or_default(),
                _ => {}
            }
        }
        state
    }

    /// Path component of a location
    #[must_use]
    pub fn path_of(location: &str) -> String {
        resolve(location).map_or_else(|| location.to_string(), |url| url.path().to_string())
    }
}

/// One-based page parameter to a zero-based index
fn parse_page(raw: &str) -> u32 {
    raw.trim()
        .parse::<i64>()
        .map(|page| (page - 1).clamp(0, i64::from(u32::MAX)))
        .ok()
        .and_then(|index| u32::try_from(index).ok())
        .unwrap_or(0)
}
