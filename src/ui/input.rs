//! User input abstraction layer
//!
//! Commands ask for form fields, passwords and confirmations through
//! [`UserInput`], so tests can answer them with a script.

use crate::list::Confirmer;
use std::io;

/// Trait for user input operations
///
/// Every prompt returns `Ok(None)` when the user cancels.
///
/// # Examples
///
/// ```no_run
/// use boxoffice::ui::input::{UserInput, DialoguerInput};
///
/// let input = DialoguerInput::new();
/// if let Some(name) = input.prompt_text("Category name", None, false).unwrap() {
///     println!("Creating {name}");
/// }
/// ```
pub trait UserInput: Send + Sync {
    /// Prompt for a line of text, optionally pre-filled with `default`
    fn prompt_text(&self, prompt: &str, default: Option<&str>, allow_empty: bool) -> Result<Option<String>>;

    /// Prompt for a hidden value
    fn prompt_password(&self, prompt: &str) -> Result<Option<String>>;

    /// Prompt for yes/no
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>>;

    /// Prompt to pick one of `items`; returns its index
    fn prompt_select(&self, prompt: &str, items: &[String], default: Option<usize>) -> Result<Option<usize>>;
}

/// Result type for user input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur during user input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// IO error during input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input cancelled by user
    #[error("Input cancelled by user")]
    Cancelled,

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// Turn a cancelled prompt into an error
///
/// # Errors
///
/// Returns `InputError::Cancelled` for `None`.
pub fn required<T>(answer: Option<T>) -> Result<T> {
    answer.ok_or(InputError::Cancelled)
}

/// CLI-based user input using dialoguer
pub struct DialoguerInput {
    theme: dialoguer::theme::ColorfulTheme,
}

impl DialoguerInput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

fn io_error(err: dialoguer::Error) -> InputError {
    InputError::Io(io::Error::other(err))
}

impl UserInput for DialoguerInput {
    fn prompt_text(&self, prompt: &str, default: Option<&str>, allow_empty: bool) -> Result<Option<String>> {
        use dialoguer::Input;

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty);

        if let Some(def) = default {
            input = input.default(def.to_string());
        }

        input.interact_text().map(Some).map_err(io_error)
    }

    fn prompt_password(&self, prompt: &str) -> Result<Option<String>> {
        use dialoguer::Password;

        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact()
            .map(Some)
            .map_err(io_error)
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>> {
        use dialoguer::Confirm;

        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(io_error)
    }

    fn prompt_select(&self, prompt: &str, items: &[String], default: Option<usize>) -> Result<Option<usize>> {
        use dialoguer::Select;

        let mut select = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items);

        if let Some(def) = default {
            select = select.default(def);
        }

        select.interact_opt().map_err(io_error)
    }
}

impl Confirmer for DialoguerInput {
    fn confirm(&self, prompt: &str) -> bool {
        match self.prompt_confirm(prompt, false) {
            Ok(answer) => answer.unwrap_or(false),
            Err(err) => {
                log::warn!("confirmation prompt failed: {err}");
                false
            }
        }
    }
}
