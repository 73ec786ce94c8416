//! Dashboard command - counts and recent activity across all lists

use super::events::category_name;
use super::{Context, Result};
use crate::BoxofficeError;
use crate::api::{self, Transport};
use crate::list::{ListFetcher, PaginatedResult, Resource};
use crate::models::{Category, Event, Order, OrderStats};
use crate::output;
use crate::query::StatusFilter;

/// Rows shown under "Recent events" and "Recent orders"
pub const RECENT: usize = 6;

/// First page of every list, each with its own outcome
#[derive(Debug)]
pub struct Overview {
    pub categories: api::Result<PaginatedResult<Category>>,
    pub events: api::Result<PaginatedResult<Event>>,
    pub orders: api::Result<PaginatedResult<Order>>,
}

impl Overview {
    /// Fetch the three first pages concurrently
    pub async fn load<T: Transport>(fetcher: &ListFetcher<T>) -> Self {
        let (categories, events, orders) = tokio::join!(
            fetcher.fetch_page::<Category>(0, "", StatusFilter::All),
            fetcher.fetch_page::<Event>(0, "", StatusFilter::All),
            fetcher.fetch_page::<Order>(0, "", StatusFilter::All),
        );
        Self {
            categories,
            events,
            orders,
        }
    }

    const fn all_failed(&self) -> bool {
        self.categories.is_err() && self.events.is_err() && self.orders.is_err()
    }
}

/// Show totals and the most recent events and orders
///
/// # Errors
/// Fails only when none of the three lists could be loaded; a single failed
/// list is reported as a warning next to the others
pub async fn execute<T: Transport>(ctx: &Context<'_, T>) -> Result<()> {
    let overview = Overview::load(&ctx.fetcher()).await;
    if overview.all_failed() {
        if let Err(err) = &overview.categories {
            log::warn!("dashboard: {err}");
        }
        return Err(BoxofficeError::Failed("Failed to load dashboard".to_string()));
    }

    total(ctx, &overview.categories);
    total(ctx, &overview.events);
    total(ctx, &overview.orders);

    if let Ok(categories) = &overview.categories {
        ctx.categories.fill(categories.items.iter().cloned());
    }

    if let Ok(events) = &overview.events {
        ctx.output.info("Recent events");
        if events.items.is_empty() {
            ctx.output.info("No events yet.");
        }
        for event in events.items.iter().take(RECENT) {
            let category = category_name(event, &ctx.categories);
            ctx.output.write(&output::event_row(event, &category, ctx.quiet));
        }
    }

    if let Ok(orders) = &overview.orders {
        ctx.output.info("Recent orders");
        if orders.items.is_empty() {
            ctx.output.info("No orders yet.");
        } else {
            ctx.output
                .info(&output::order_stats(&OrderStats::from_orders(&orders.items)));
        }
        for order in orders.items.iter().take(RECENT) {
            ctx.output.write(&output::order_row(order, ctx.quiet));
        }
    }
    Ok(())
}

/// One total line, or a warning for a list that failed
fn total<T, R: Resource>(ctx: &Context<'_, T>, page: &api::Result<PaginatedResult<R>>) {
    let label = capitalized(R::PLURAL);
    match page {
        Ok(page) => ctx
            .output
            .write(&output::field(&label, &page.total_count.to_string())),
        Err(err) => ctx.output.warning(&format!(
            "{label}: {}",
            err.message_or(&format!("Failed to load {}", R::PLURAL))
        )),
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
