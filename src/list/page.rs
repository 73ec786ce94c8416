//! Normalized paging results
//!
//! List endpoints answer with either a paging envelope or a bare array.
//! Both are folded into [`PaginatedResult`] here, so nothing above the
//! fetch boundary branches on the response shape.

use serde::Deserialize;

/// One page of a remote list
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    /// Server-side count of matching rows, independent of local filtering
    pub total_count: u64,
    pub limit: u32,
    pub offset: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PaginatedResult<T> {
    /// An empty page, as shown after a failed fetch
    #[must_use]
    pub const fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            limit,
            offset: 0,
            has_next: false,
            has_previous: false,
        }
    }

    /// Treat a bare array as a single complete page
    #[must_use]
    pub fn from_bare(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            total_count: len as u64,
            limit: u32::try_from(len).unwrap_or(u32::MAX),
            offset: 0,
            has_next: false,
            has_previous: false,
            items,
        }
    }

    /// Number of pages implied by `total_count` and `page_size`
    #[must_use]
    pub fn page_count(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 1;
        }
        self.total_count.div_ceil(u64::from(page_size)).max(1)
    }
}

/// Paging envelope as sent by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    items: Vec<T>,
    #[serde(default)]
    total_count: Option<u64>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    offset: Option<u32>,
    #[serde(default)]
    has_next: bool,
    #[serde(default)]
    has_previous: bool,
}

/// Either response shape of a list endpoint
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Envelope(Envelope<T>),
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Fold into a [`PaginatedResult`]
    ///
    /// `requested_limit` and `requested_offset` fill in what the envelope
    /// leaves out.
    #[must_use]
    pub fn normalize(self, requested_limit: u32, requested_offset: u32) -> PaginatedResult<T> {
        match self {
            Self::Envelope(envelope) => PaginatedResult {
                total_count: envelope.total_count.unwrap_or(envelope.items.len() as u64),
                limit: envelope.limit.unwrap_or(requested_limit),
                offset: envelope.offset.unwrap_or(requested_offset),
                has_next: envelope.has_next,
                has_previous: envelope.has_previous,
                items: envelope.items,
            },
            Self::Bare(items) => PaginatedResult::from_bare(items),
        }
    }
}
