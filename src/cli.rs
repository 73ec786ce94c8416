//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for boxoffice using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **account**: login, register, logout, activate, refresh, passwords, profile
//! - **categories / events / orders**: list, show, create, update, delete
//! - **open / browse**: print or interactively browse a list by its location
//! - **dashboard**: totals and recent activity
//! - **theme / config / completions**: local settings
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Global `--yes` to skip delete confirmations
//! - Command aliases (e.g., `ls` for `list`, `rm` for `delete`)
//! - Any missing create/update field is prompted for
//!
//! # Examples
//!
//! ```
//! use boxoffice::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["boxoffice", "orders", "list", "--status", "unpaid"]);
//! assert!(matches!(cli.get_command(), Commands::Orders { .. }));
//! ```

use crate::query::StatusFilter;
use crate::ui::ThemePreference;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Search and page of a list command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// Search text sent to the server
    #[arg(long = "q", visible_alias = "search", value_name = "TEXT")]
    pub query: Option<String>,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

/// Category subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum CategoriesCommands {
    /// List categories
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create a category
    Create {
        /// Name of the new category (prompted when omitted)
        #[arg(long)]
        name: Option<String>,
    },

    /// Rename a category
    Update {
        /// Category id
        id: String,

        /// New name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a category
    #[command(visible_alias = "rm")]
    Delete {
        /// Category id
        id: String,
    },
}

/// Event fields; anything missing is prompted for
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct EventFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub artist: Option<String>,

    /// Ticket price
    #[arg(long)]
    pub price: Option<f64>,

    /// Start, e.g. "2025-06-01 20:00"
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Category id
    #[arg(long = "category", value_name = "CATEGORY_ID")]
    pub category_id: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,
}

/// Event subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum EventsCommands {
    /// List events
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one event
    Show {
        /// Event id
        id: String,
    },

    /// Create an event
    Create(EventFields),

    /// Update an event
    Update {
        /// Event id
        id: String,

        #[command(flatten)]
        fields: EventFields,
    },

    /// Delete an event
    #[command(visible_alias = "rm")]
    Delete {
        /// Event id
        id: String,
    },

    /// Download all events as CSV
    Export {
        /// Directory to save the file in
        #[arg(short = 'o', long = "output", default_value = ".")]
        dir: PathBuf,
    },
}

/// Order fields; anything missing is prompted for
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct OrderFields {
    #[arg(long = "user")]
    pub user_id: Option<String>,

    /// Order total
    #[arg(long)]
    pub total: Option<f64>,

    /// Placement time, defaults to now
    #[arg(long)]
    pub placed: Option<String>,

    /// Whether the order is paid
    #[arg(long)]
    pub paid: Option<bool>,
}

/// Order subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum OrdersCommands {
    /// List orders
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Show only paid or unpaid orders (applied to the fetched page)
        #[arg(long, default_value = "all", value_name = "all|paid|unpaid")]
        status: StatusFilter,
    },

    /// Show one order
    Show {
        /// Order id
        id: String,
    },

    /// Create an order
    Create(OrderFields),

    /// Update an order
    Update {
        /// Order id
        id: String,

        #[command(flatten)]
        fields: OrderFields,
    },

    /// Delete an order
    #[command(visible_alias = "rm")]
    Delete {
        /// Order id
        id: String,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommands {
    /// Show the signed-in user's profile
    Show,

    /// Change name or email; prompts when no flag is given
    Update {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
}

/// Account subcommands, available at the top level
#[derive(Subcommand, Debug, Clone)]
pub enum AccountCommands {
    /// Sign in
    Login {
        #[arg(long)]
        email: Option<String>,
    },

    /// Create an account
    Register,

    /// Sign out and forget the stored session
    Logout,

    /// Activate a registered account
    Activate {
        /// Id from the activation link
        user_id: String,
    },

    /// Exchange the refresh token for a new session token
    Refresh,

    /// Ask for password reset instructions
    #[command(name = "forgot-password")]
    ForgotPassword {
        #[arg(long)]
        email: Option<String>,
    },

    /// Set a new password with a reset token
    #[command(name = "reset-password")]
    ResetPassword {
        /// Token from the reset link
        token: String,
    },

    /// Change the password of the signed-in user
    #[command(name = "change-password")]
    ChangePassword,

    /// Show or update the profile
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommands>,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., page_size=20), or just the key
        #[arg(value_name = "KEY[=VALUE]")]
        setting: String,

        /// Value, when not given as key=value
        #[arg(value_name = "VALUE")]
        value: Option<String>,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., api_url)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Show every setting
    #[command(visible_alias = "ls")]
    List,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "boxoffice")]
#[command(about = "Manage events, categories and orders of a ticketing service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Answer yes to delete confirmations
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// API origin for this run (overrides config)
    #[arg(long = "api-url", global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(flatten)]
    Account(AccountCommands),

    /// Manage categories
    #[command(visible_alias = "cat")]
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },

    /// Manage events
    #[command(visible_alias = "ev")]
    Events {
        #[command(subcommand)]
        command: EventsCommands,
    },

    /// Manage orders
    #[command(visible_alias = "ord")]
    Orders {
        #[command(subcommand)]
        command: OrdersCommands,
    },

    /// Print the list page at a location, e.g. "/orders?status=unpaid&page=2"
    Open {
        location: String,
    },

    /// Browse a list interactively (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Starting location, e.g. "/events?q=jazz"
        location: Option<String>,
    },

    /// Totals and recent events and orders
    #[command(visible_alias = "dash")]
    Dashboard,

    /// Show or set the light/dark preference
    Theme {
        theme: Option<ThemePreference>,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Browse { location: None })
    }
}
