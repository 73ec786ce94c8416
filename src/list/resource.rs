//! Per-entity configuration of the generic list machinery
//!
//! Categories, events and orders share one fetch/mutate/navigate pipeline.
//! A [`Resource`] supplies only what differs: endpoint names, how an update
//! request is shaped, the local status predicate and a one-line summary.

use crate::models::{Category, CategoryDraft, Event, EventDraft, Order, OrderDraft, Validate};
use crate::query::StatusFilter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;

/// An entity managed through a remote list endpoint
pub trait Resource: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Request payload for create and update
    type Draft: Serialize + Validate + Clone + Debug + Send + Sync + 'static;

    /// API path segment, e.g. `category`
    const ENDPOINT: &'static str;

    /// Display name, e.g. `Category`
    const LABEL: &'static str;

    /// Plural used in list locations and messages, e.g. `categories`
    const PLURAL: &'static str;

    /// Whether the status filter applies to this list
    const FILTERS_BY_STATUS: bool = false;

    fn id(&self) -> &str;

    /// One-line description for list rows
    fn summary(&self) -> String;

    /// Local status predicate; lists without a status accept everything
    fn admits(&self, _filter: StatusFilter) -> bool {
        true
    }

    #[must_use]
    fn list_path() -> String {
        format!("/{}/all", Self::ENDPOINT)
    }

    #[must_use]
    fn item_path(id: &str) -> String {
        format!("/{}/{}", Self::ENDPOINT, id)
    }

    #[must_use]
    fn create_path() -> String {
        format!("/{}", Self::ENDPOINT)
    }

    /// Path and body for an update
    ///
    /// # Errors
    ///
    /// Fails if the draft cannot be serialized.
    fn update_request(id: &str, draft: &Self::Draft) -> Result<(String, Value), serde_json::Error> {
        Ok((Self::item_path(id), serde_json::to_value(draft)?))
    }

    /// Location path of the list view, e.g. `/categories`
    #[must_use]
    fn location_path() -> String {
        format!("/{}", Self::PLURAL)
    }
}

impl Resource for Category {
    type Draft = CategoryDraft;

    const ENDPOINT: &'static str = "category";
    const LABEL: &'static str = "Category";
    const PLURAL: &'static str = "categories";

    fn id(&self) -> &str {
        &self.category_id
    }

    fn summary(&self) -> String {
        self.name.clone()
    }
}

impl Resource for Event {
    type Draft = EventDraft;

    const ENDPOINT: &'static str = "event";
    const LABEL: &'static str = "Event";
    const PLURAL: &'static str = "events";

    fn id(&self) -> &str {
        &self.event_id
    }

    fn summary(&self) -> String {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "TBA".to_string());
        let category = self
            .category
            .as_ref()
            .map_or(self.category_id.as_str(), |c| c.name.as_str());
        format!(
            "{}  {}  ${:.2}  {}  [{}]",
            self.name, self.artist, self.price, date, category
        )
    }

    /// Events are updated at the collection path with the id in the body
    fn update_request(id: &str, draft: &EventDraft) -> Result<(String, Value), serde_json::Error> {
        let mut body = serde_json::to_value(draft)?;
        if let Value::Object(map) = &mut body {
            map.insert("eventId".to_string(), Value::String(id.to_string()));
        }
        Ok((Self::create_path(), body))
    }
}

impl Resource for Order {
    type Draft = OrderDraft;

    const ENDPOINT: &'static str = "order";
    const LABEL: &'static str = "Order";
    const PLURAL: &'static str = "orders";
    const FILTERS_BY_STATUS: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        let placed = self
            .order_placed
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let status = if self.order_paid { "PAID" } else { "UNPAID" };
        format!(
            "#{}  user {}  ${:.2}  {}  {}",
            self.id, self.user_id, self.order_total, status, placed
        )
    }

    fn admits(&self, filter: StatusFilter) -> bool {
        filter.admits(self.order_paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths() {
        assert_eq!(Category::list_path(), "/category/all");
        assert_eq!(Event::item_path("e1"), "/event/e1");
        assert_eq!(Order::create_path(), "/order");
        assert_eq!(Order::location_path(), "/orders");
    }

    #[test]
    fn test_category_update_uses_item_path() {
        let draft = CategoryDraft { name: "Jazz".into() };
        let (path, body) = Category::update_request("c1", &draft).unwrap();
        assert_eq!(path, "/category/c1");
        assert_eq!(body, json!({ "name": "Jazz" }));
    }

    #[test]
    fn test_event_update_puts_id_in_body() {
        let draft = EventDraft {
            name: "Gala".into(),
            category_id: "c1".into(),
            ..EventDraft::default()
        };
        let (path, body) = Event::update_request("e7", &draft).unwrap();
        assert_eq!(path, "/event");
        assert_eq!(body["eventId"], "e7");
        assert_eq!(body["name"], "Gala");
    }

    #[test]
    fn test_order_status_predicate() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1", "userId": "u1", "orderTotal": 12.5, "orderPaid": false
        }))
        .unwrap();
        assert!(order.admits(StatusFilter::All));
        assert!(order.admits(StatusFilter::Unpaid));
        assert!(!order.admits(StatusFilter::Paid));
        assert!(order.summary().contains("UNPAID"));
    }

    #[test]
    fn test_categories_ignore_status() {
        let category: Category =
            serde_json::from_value(json!({ "categoryId": "c1", "name": "Jazz" })).unwrap();
        assert!(category.admits(StatusFilter::Paid));
        assert_eq!(category.summary(), "Jazz");
    }
}
