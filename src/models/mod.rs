//! Entities and request payloads exchanged with the ticketing API
//!
//! Field names follow the API's camelCase wire format. Entity ids accept
//! the generic `id` alias because list and detail endpoints disagree on
//! the key.

pub mod validation;
pub mod wire;

pub use validation::{Validate, ValidationError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "id", deserialize_with = "wire::id_string")]
    pub category_id: String,
    pub name: String,
    #[serde(default, with = "wire::timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, with = "wire::timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// A ticketed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "id", deserialize_with = "wire::id_string")]
    pub event_id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, with = "wire::timestamp_opt")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Embedded category, when the API expands it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, with = "wire::timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, with = "wire::timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "orderId", deserialize_with = "wire::id_string")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub order_total: f64,
    #[serde(default, with = "wire::timestamp_opt")]
    pub order_placed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order_paid: bool,
    #[serde(default, with = "wire::timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, with = "wire::timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Payload for creating or renaming a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
}

/// Payload for creating or updating an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub name: String,
    pub price: f64,
    #[serde(default, with = "wire::timestamp_opt")]
    pub date: Option<DateTime<Utc>>,
    pub artist: String,
    pub description: String,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Payload for creating or updating an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub user_id: String,
    pub order_total: f64,
    #[serde(with = "wire::timestamp")]
    pub order_placed: DateTime<Utc>,
    pub order_paid: bool,
}

impl From<&Category> for CategoryDraft {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
        }
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            price: event.price,
            date: event.date,
            artist: event.artist.clone(),
            description: event.description.clone(),
            category_id: event.category_id.clone(),
            image_url: event.image_url.clone(),
        }
    }
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            user_id: order.user_id.clone(),
            order_total: order.order_total,
            order_placed: order.order_placed.unwrap_or_else(Utc::now),
            order_paid: order.order_paid,
        }
    }
}

/// CSV file descriptor returned by the event export endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    /// File contents
    pub data: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default, alias = "eventExportFileName")]
    pub file_name: Option<String>,
}

/// Revenue and payment summary over a set of orders
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderStats {
    pub count: usize,
    pub revenue: f64,
    pub paid: usize,
    pub pending: usize,
}

impl OrderStats {
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        orders.iter().fold(Self::default(), |mut stats, order| {
            stats.count += 1;
            stats.revenue += order.order_total;
            if order.order_paid {
                stats.paid += 1;
            } else {
                stats.pending += 1;
            }
            stats
        })
    }
}
