//! Ratatui widgets for the list browser

mod confirm_dialog;
mod help_bar;
mod help_overlay;
mod item_list;
mod search_bar;
mod status_bar;

pub use confirm_dialog::{ConfirmDialog, ConfirmDialogState};
pub use help_bar::{HelpBar, KeyHint};
pub use help_overlay::HelpOverlay;
pub use item_list::ItemList;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
