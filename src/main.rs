//! Boxoffice CLI application entry point
//!
//! This is the main executable for the boxoffice ticketing client. It provides
//! a command-line interface for managing categories, events and orders and an
//! interactive list browser.
//!
//! # Features
//!
//! - **Browse Mode**: Interactive, searchable list of any entity (default)
//! - **Lists**: Paged, searchable listings with a shareable location
//! - **Mutations**: Create, update and confirmed delete of every entity
//! - **Account**: Sign in, registration, password flows and profile
//! - **Quiet Mode**: Tab-separated results without notes for scripting
//!
//! # Usage
//!
//! ```bash
//! # Browse events interactively (default command)
//! boxoffice
//! boxoffice browse "/orders?status=unpaid"
//!
//! # Sign in
//! boxoffice login --email ada@example.com
//!
//! # Print one page of a list
//! boxoffice events list --q jazz --page 2
//! boxoffice open "/orders?q=vip&status=paid"
//!
//! # Delete without confirmation
//! boxoffice -y categories delete 42
//!
//! # Quiet mode (only output results)
//! boxoffice -q orders list
//! ```
//!
//! # Configuration
//!
//! On first run, boxoffice will prompt for initial setup. Configuration is
//! stored in the user's config directory (`~/.config/boxoffice/config.toml`
//! on Linux). Set `RUST_LOG=debug` to trace requests.

use boxoffice::{
    BoxofficeError,
    api::{ApiClient, ReqwestTransport},
    auth::{AuthSession, SessionStore},
    cli::{Cli, Commands},
    commands::{self, Context, browse::DEFAULT_LOCATION},
    completions,
    config::BoxofficeConfig,
    list::{AutoConfirm, CategoryDirectory, Confirmer},
    ui::{DialoguerInput, OutputWriter, StdoutWriter},
};
use clap::CommandFactory;
use env_logger::Env;
use std::sync::Arc;
use tokio::runtime::Runtime;

type Result<T> = std::result::Result<T, BoxofficeError>;

/// Run one parsed command line
///
/// # Errors
///
/// Returns `BoxofficeError` if configuration or the session store cannot be
/// loaded, or the command itself fails.
fn run(cli: Cli) -> Result<()> {
    let command = cli.get_command();

    if let Commands::Completions { shell } = &command {
        completions::generate_static(*shell, &mut Cli::command(), &mut std::io::stdout());
        return Ok(());
    }

    let mut config = BoxofficeConfig::load_or_setup()?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }

    let quiet = cli.quiet || config.quiet;
    let output = StdoutWriter::new(quiet);

    if let Commands::Config { command } = &command {
        return commands::config(config, &BoxofficeConfig::config_path()?, &output, command);
    }

    let store = SessionStore::open(config.session_path()?)?;
    if let Commands::Theme { theme } = &command {
        return commands::theme(&store, &output, *theme);
    }

    let runtime = Runtime::new()?;
    let client = Arc::new(ApiClient::new(ReqwestTransport::new(), &config.api_url));
    let appearance = store.theme()?.resolve();
    let mut session = AuthSession::new(Arc::clone(&client), store);
    if session.restore()? {
        log::debug!("resumed stored session");
    }

    if let Commands::Browse { location } = &command {
        let location = location.as_deref().unwrap_or(DEFAULT_LOCATION);
        return commands::browse(runtime.handle(), client, &config, appearance, location);
    }

    let input = DialoguerInput::new();
    let auto_confirm = AutoConfirm::yes();
    let confirmer: &dyn Confirmer = if cli.yes { &auto_confirm } else { &input };
    let ctx = Context {
        client,
        config: &config,
        output: &output,
        input: &input,
        confirmer,
        categories: CategoryDirectory::new(),
        quiet,
    };

    runtime.block_on(async {
        match &command {
            Commands::Account(command) => commands::account(&mut session, &ctx, command).await,
            Commands::Categories { command } => commands::categories(&ctx, command).await,
            Commands::Events { command } => commands::events(&ctx, command).await,
            Commands::Orders { command } => commands::orders(&ctx, command).await,
            Commands::Open { location } => commands::open(&ctx, location).await,
            Commands::Dashboard => commands::dashboard(&ctx).await,
            Commands::Browse { .. }
            | Commands::Theme { .. }
            | Commands::Config { .. }
            | Commands::Completions { .. } => unreachable!(),
        }
    })
}

/// Main entry point for the boxoffice application
///
/// Parses command-line arguments, runs the command and reports a failure on
/// stderr with a non-zero exit status.
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_args();
    if let Err(err) = run(cli) {
        log::debug!("command failed: {err:?}");
        StdoutWriter::new(false).error(&err.to_string());
        std::process::exit(1);
    }
}
