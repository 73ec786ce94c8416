//! Generic remote list machinery
//!
//! Categories, events and orders are all browsed the same way: a search
//! box, paging, an optional status filter and create/update/delete with a
//! banner reporting the outcome. This module implements that once.
//!
//! - [`ListFetcher`] turns a page request into a [`PaginatedResult`]
//! - [`MutationCoordinator`] validates and sends mutations
//! - [`ListController`] owns query, paging and banner state without I/O
//! - [`RemoteList`] drives a controller with awaited fetches

mod categories;
mod controller;
mod fetcher;
mod mutation;
mod page;
mod remote;
mod resource;

pub use categories::CategoryDirectory;
pub use controller::{Banner, FetchTicket, ListController, LoadState};
pub use fetcher::{ListFetcher, PAGE_SIZE};
pub use mutation::{
    AutoConfirm, Confirmer, MutationCoordinator, MutationError, MutationKind, MutationOutcome,
    MutationReceipt,
};
pub use page::{ListResponse, PaginatedResult};
pub use remote::RemoteList;
pub use resource::Resource;
