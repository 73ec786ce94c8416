//! UI abstraction layer
//!
//! Commands talk to the user through traits so the same code can run
//! against a terminal, the list browser or a test script.
//!
//! # Core Traits
//!
//! - **`UserInput`** - User prompts (text input, password, confirmation, selection)
//! - **`OutputWriter`** - Status messages with severity levels
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Business Logic Layer               │
//! │   (commands, auth, lists)               │
//! └────────────────┬────────────────────────┘
//!                  │ Uses traits
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      UI Trait Abstraction               │
//! │  (UserInput, OutputWriter)              │
//! └────────────────┬────────────────────────┘
//!                  │ Implemented by
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ CLI Adapters  │  │ TUI Adapter       │
//! │ - Dialoguer   │  │ - ListBrowser     │
//! │ - Stdout      │  │ - StatusBarWriter │
//! └───────────────┘  └───────────────────┘
//! ```

pub mod error;
pub mod input;
pub mod output;
pub mod ratatui_adapter;
pub mod theme;

#[cfg(test)]
pub mod mock;

pub use error::{Result, UiError};
pub use input::{DialoguerInput, InputError, UserInput};
pub use output::{MessageLevel, OutputWriter, StatusBarWriter, StdoutWriter};
pub use theme::{Appearance, ThemePreference};
