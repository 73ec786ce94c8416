//! Output formatting for CLI display
//!
//! This module turns entities into list rows and detail blocks. With
//! `quiet` set, rows collapse to tab-separated fields for scripting.

use crate::list::{PaginatedResult, Resource};
use crate::models::{Category, Event, Order, OrderStats};
use crate::query::QueryState;
use chrono::{DateTime, Utc};
use colored::Colorize;

/// Format an amount as dollars
#[must_use]
pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Format an optional timestamp, with `missing` when absent
#[must_use]
pub fn timestamp(value: Option<DateTime<Utc>>, missing: &str) -> String {
    value.map_or_else(
        || missing.to_string(),
        |d| d.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Payment badge for an order
#[must_use]
pub fn paid_badge(paid: bool) -> String {
    if paid {
        "PAID".green().to_string()
    } else {
        "UNPAID".yellow().to_string()
    }
}

#[must_use]
pub fn category_row(category: &Category, quiet: bool) -> String {
    if quiet {
        format!("{}\t{}", category.category_id, category.name)
    } else {
        format!("  {} {}", category.name.bold(), format!("({})", category.category_id).dimmed())
    }
}

/// Format an event row with its resolved category name
#[must_use]
pub fn event_row(event: &Event, category: &str, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", event.event_id, event.name);
    }
    format!(
        "  {} {} {} {} [{}] {}",
        event.name.bold(),
        event.artist,
        money(event.price).cyan(),
        timestamp(event.date, "TBA"),
        category,
        format!("({})", event.event_id).dimmed()
    )
}

#[must_use]
pub fn order_row(order: &Order, quiet: bool) -> String {
    if quiet {
        let status = if order.order_paid { "paid" } else { "unpaid" };
        return format!("{}\t{}\t{}", order.id, order.order_total, status);
    }
    format!(
        "  #{} user {} {} {} {}",
        order.id.bold(),
        order.user_id,
        money(order.order_total).cyan(),
        paid_badge(order.order_paid),
        timestamp(order.order_placed, "").dimmed()
    )
}

/// Paging line under a list, e.g. `Page 2/5 · 47 orders · unpaid`
#[must_use]
pub fn page_footer<R: Resource>(page: &PaginatedResult<R>, query: &QueryState, page_size: u32) -> String {
    let pages = page.page_count(page_size).max(1);
    let mut footer = format!(
        "Page {}/{} · {} {}",
        u64::from(query.page_index) + 1,
        pages,
        page.total_count,
        R::PLURAL
    );
    if !query.search_text.is_empty() {
        footer.push_str(&format!(" · matching \"{}\"", query.search_text));
    }
    if R::FILTERS_BY_STATUS {
        footer.push_str(&format!(" · {}", query.status));
    }
    footer
}

/// Revenue summary line for a page of orders
#[must_use]
pub fn order_stats(stats: &OrderStats) -> String {
    format!(
        "{} orders · {} revenue · {} paid · {} pending",
        stats.count,
        money(stats.revenue),
        stats.paid,
        stats.pending
    )
}

/// `label: value` line of a detail block
#[must_use]
pub fn field(label: &str, value: &str) -> String {
    format!("  {:<12} {}", format!("{label}:").dimmed(), value)
}
