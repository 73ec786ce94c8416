//! Interactive setup wizard for first-time configuration
//!
//! Runs when boxoffice starts without a config file and asks for the
//! API location and list page size.

use super::{BoxofficeConfig, DEFAULT_API_URL};
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};

/// Interactive first-time setup - prompts for the API origin and page size
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - User input cannot be read
/// - The configuration cannot be saved
///
/// # Examples
/// ```ignore
/// use boxoffice::config::first_time_setup;
///
/// let config = first_time_setup()?;
/// println!("Talking to {}", config.api_url);
/// ```
pub fn first_time_setup() -> Result<BoxofficeConfig, ConfigError> {
    println!("Welcome to boxoffice! Let's point it at your ticketing API.\n");

    let theme = ColorfulTheme::default();

    let api_url: String = Input::with_theme(&theme)
        .with_prompt("API URL")
        .default(DEFAULT_API_URL.to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let page_size: u32 = Input::with_theme(&theme)
        .with_prompt("Rows per page")
        .default(crate::list::PAGE_SIZE)
        .validate_with(|size: &u32| if *size == 0 { Err("must be at least 1") } else { Ok(()) })
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let mut config = BoxofficeConfig::default();
    config.set("api_url", &api_url)?;
    config.page_size = page_size;

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
