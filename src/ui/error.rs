//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Location does not name a browsable list
    #[error("No list at '{0}' (expected /categories, /events or /orders)")]
    UnknownLocation(String),

    /// Background work stopped before the browser did
    #[error("UI operation was interrupted")]
    InterruptedError,

    /// IO error during UI operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_location_message() {
        let err = UiError::UnknownLocation("/venues".into());
        assert_eq!(
            err.to_string(),
            "No list at '/venues' (expected /categories, /events or /orders)"
        );
    }
}
