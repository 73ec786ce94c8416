//! Client-side form checks
//!
//! These are superficial checks run before any request leaves the process.
//! A failing check means zero network calls; the remote API stays the
//! authority on everything else.

use super::{Category, CategoryDraft, EventDraft, OrderDraft};
use thiserror::Error;

/// Minimum password length accepted by registration, reset and change forms
pub const MIN_PASSWORD_LEN: usize = 8;

/// A local validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Category name is required")]
    CategoryNameRequired,

    #[error("Name and category are required")]
    EventFieldsRequired,

    #[error("Selected category does not exist")]
    UnknownCategory(String),

    #[error("Price cannot be negative")]
    NegativePrice,

    #[error("User ID is required")]
    UserIdRequired,

    #[error("Order total cannot be negative")]
    NegativeOrderTotal,

    /// Generic required-field failure for auth forms
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("New passwords do not match.")]
    NewPasswordMismatch,

    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,

    #[error("Invalid reset link")]
    InvalidResetLink,

    #[error("No changes to save")]
    NoChanges,

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Drafts that can be checked before submission
pub trait Validate {
    /// Run the local checks
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for CategoryDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::CategoryNameRequired);
        }
        Ok(())
    }
}

impl Validate for EventDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() || self.category_id.trim().is_empty() {
            return Err(ValidationError::EventFieldsRequired);
        }
        if !(self.price >= 0.0) {
            return Err(ValidationError::NegativePrice);
        }
        Ok(())
    }
}

impl EventDraft {
    /// Check that the chosen category is one of the loaded categories
    ///
    /// # Errors
    ///
    /// Returns `UnknownCategory` when `category_id` matches none of them.
    pub fn validate_category(&self, categories: &[Category]) -> Result<(), ValidationError> {
        if categories.iter().any(|c| c.category_id == self.category_id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownCategory(self.category_id.clone()))
        }
    }
}

impl Validate for OrderDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::UserIdRequired);
        }
        if !(self.order_total >= 0.0) {
            return Err(ValidationError::NegativeOrderTotal);
        }
        Ok(())
    }
}

/// Check a new password and its confirmation
///
/// Mismatch is reported before length.
///
/// # Errors
///
/// Returns `PasswordMismatch` or `PasswordTooShort`.
pub fn check_new_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Fail with `Required(field)` when `value` is blank
///
/// # Errors
///
/// Returns `Required` for empty or whitespace-only values.
pub fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}
