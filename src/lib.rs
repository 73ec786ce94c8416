//! Boxoffice - a terminal client for an event ticketing service
//!
//! This library provides typed access to the service's categories, events
//! and orders: paginated list views whose search, page and status filter
//! live in a shareable location string, confirmed mutations, and a
//! persisted authentication session.

use thiserror::Error;

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod completions;
pub mod config;
pub mod list;
pub mod models;
pub mod output;
pub mod query;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum BoxofficeError {
    /// Request to the ticketing API failed
    #[error(transparent)]
    Api(#[from] api::ApiError),
    /// Rejected by a local check before any request
    #[error(transparent)]
    Validation(#[from] models::ValidationError),
    /// Create, update or delete failed
    #[error(transparent)]
    Mutation(#[from] list::MutationError),
    /// Authentication operation failed
    #[error(transparent)]
    Auth(#[from] auth::AuthError),
    /// Session store failure
    #[error(transparent)]
    Store(#[from] auth::StoreError),
    /// Terminal UI failure
    #[error(transparent)]
    Ui(#[from] ui::UiError),
    /// Prompt failed or was cancelled
    #[error(transparent)]
    Input(#[from] ui::InputError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Operation failed with a message for the user
    #[error("{0}")]
    Failed(String),
}
