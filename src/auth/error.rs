//! Authentication and session-store error types
//!
//! # Error Types
//!
//! - **`StoreError`**: failures of the durable session store
//! - **`AuthError`**: failures of an auth operation, local or remote

use crate::api::ApiError;
use crate::models::ValidationError;
use thiserror::Error;

/// Session store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Session store error: {0}")]
    Sled(#[from] sled::Error),

    /// A stored value could not be decoded
    #[error("Corrupt session entry '{key}': {reason}")]
    Corrupt { key: &'static str, reason: String },

    /// A value could not be encoded for storage
    #[error("Error while encoding session data: {0}")]
    Encode(String),
}

/// Errors produced by auth operations
#[derive(Debug, Error)]
pub enum AuthError {
    /// Rejected by a local check before any request
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Remote failure
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Durable storage failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The operation needs a signed-in user
    #[error("Not signed in")]
    NotSignedIn,
}

impl AuthError {
    /// Message for the user, with `fallback` for remote failures without one
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Api(err) => err.message_or(fallback),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
