//! Remote API error types
//!
//! Every failure that crosses the HTTP boundary ends up here. The remote
//! service is trusted to phrase its own failures, so a non-2xx reply keeps
//! the body text as the message and the status text as a fallback.
//!
//! # Error Types
//!
//! - **`Status`**: the server answered with a non-2xx status
//! - **`Transport`**: the request never produced a response (DNS, refused, TLS)
//! - **`Decode`**: the response body did not match the expected shape
//! - **`Rejected`**: a 2xx `{ success: false }` reply

use thiserror::Error;

/// Errors produced while talking to the ticketing API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the body text or the status text
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Human-readable message taken from the response
        message: String,
    },

    /// Network-level failure before any response arrived
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server acknowledged the request but reported `success: false`
    #[error("{message}")]
    Rejected {
        /// Message reported by the server
        message: String,
        /// Per-field or per-rule errors, if any
        errors: Vec<String>,
    },
}

impl ApiError {
    /// Build a status error from a response body, falling back to the status text
    #[must_use]
    pub fn from_status(status: u16, status_text: &str, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            status_text.to_string()
        } else {
            body.to_string()
        };
        Self::Status { status, message }
    }

    /// Message suitable for a banner, or `fallback` when the error carries none
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        let message = match self {
            Self::Status { message, .. } => message.clone(),
            Self::Rejected { message, errors } => {
                if message.trim().is_empty() {
                    errors.join("; ")
                } else {
                    message.clone()
                }
            }
            Self::Transport(message) => message.clone(),
            Self::Decode(_) => String::new(),
        };

        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the credentials
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
