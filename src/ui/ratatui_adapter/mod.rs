//! Ratatui-based list browser
//!
//! One screen per list: a search box, the rows of the current page, a
//! status bar for banners and paging, and a line of key hints.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              ListBrowser                    │
//! │   (event loop on the calling thread)        │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │   tokio    │ │  Ratatui  │ │ Crossterm │
//! │  (fetches) │ │ (widgets) │ │  (events) │
//! └────────────┘ └───────────┘ └───────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use app::ListBrowser;
pub use events::{EventResult, handle_key};
pub use state::{BrowserState, Mode};
pub use theme::Theme;
