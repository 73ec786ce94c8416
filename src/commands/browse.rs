//! Open and browse commands - jump to a list by its location
//!
//! A location is the path and query of a list view, e.g.
//! `/orders?q=vip&page=2&status=unpaid`. `open` prints that page once;
//! `browse` starts the interactive browser there.

use super::{Context, Result, categories, events, orders};
use crate::api::{ApiClient, Transport};
use crate::config::BoxofficeConfig;
use crate::list::{CategoryDirectory, ListFetcher, Resource};
use crate::models::{Category, Event, Order};
use crate::output;
use crate::query::QueryState;
use crate::ui::ratatui_adapter::{ListBrowser, Theme};
use crate::ui::{Appearance, UiError};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Where `browse` starts without a location
pub const DEFAULT_LOCATION: &str = "/events";

/// Print the list page at `location`
///
/// # Errors
/// Returns `UiError::UnknownLocation` when the path names no list, otherwise
/// whatever loading the list returns
pub async fn open<T: Transport>(ctx: &Context<'_, T>, location: &str) -> Result<()> {
    match QueryState::path_of(location).as_str() {
        "/categories" => categories::list_at(ctx, location).await,
        "/events" => events::list_at(ctx, location).await,
        "/orders" => orders::list_at(ctx, location).await,
        _ => Err(UiError::UnknownLocation(location.to_string()).into()),
    }
}

/// Browse the list at `location` until the user quits
///
/// Blocks the calling thread; must not run inside the runtime of `handle`.
///
/// # Errors
/// Returns `UiError::UnknownLocation` when the path names no list, or a
/// terminal error from the browser
pub fn browse<T: Transport + 'static>(
    handle: &Handle,
    client: Arc<ApiClient<T>>,
    config: &BoxofficeConfig,
    appearance: Appearance,
    location: &str,
) -> Result<()> {
    let browser = ListBrowser::new()
        .with_theme(Theme::for_appearance(appearance))
        .with_page_size(config.page_size)
        .with_search(config.debounce(), config.search_min_length);

    match QueryState::path_of(location).as_str() {
        "/categories" => browser.run::<T, Category>(handle, client, location, Category::summary)?,
        "/events" => {
            let directory = CategoryDirectory::pinned();
            let fetcher = ListFetcher::new(Arc::clone(&client));
            if let Err(err) = handle.block_on(directory.load(&fetcher)) {
                log::warn!("category names unavailable: {err}");
            }
            browser.run::<T, Event>(handle, client, location, |event| event_label(event, &directory))?;
        }
        "/orders" => browser.run::<T, Order>(handle, client, location, Order::summary)?,
        _ => return Err(UiError::UnknownLocation(location.to_string()).into()),
    }
    Ok(())
}

/// Plain event row for the browser, with the category name resolved
fn event_label(event: &Event, directory: &CategoryDirectory) -> String {
    let date = event
        .date
        .map_or_else(|| "TBA".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string());
    format!(
        "{}  {}  {}  {}  [{}]",
        event.name,
        event.artist,
        output::money(event.price),
        date,
        events::category_name(event, directory)
    )
}
