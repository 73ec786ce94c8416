//! Orders command - list, inspect and maintain orders

use super::{Context, Result, create, list_location, load_list, print_list, remove, update};
use crate::api::Transport;
use crate::cli::{OrderFields, OrdersCommands};
use crate::models::wire::parse_timestamp;
use crate::models::{Order, OrderDraft, OrderStats, ValidationError};
use crate::output;
use crate::ui::InputError;
use crate::ui::input::required;
use chrono::Utc;

/// Execute an orders subcommand
///
/// # Errors
/// Returns an error if a request fails, a local check rejects the draft, or
/// a prompt is cancelled
pub async fn execute<T: Transport>(ctx: &Context<'_, T>, command: &OrdersCommands) -> Result<()> {
    match command {
        OrdersCommands::List { list, status } => list_at(ctx, &list_location::<Order>(list, *status)).await,
        OrdersCommands::Show { id } => {
            let order: Order = ctx.fetcher().fetch_one(id).await?;
            ctx.output.write(&format!("Order #{}", order.id));
            ctx.output.write(&output::field("User", &order.user_id));
            ctx.output.write(&output::field("Total", &output::money(order.order_total)));
            ctx.output.write(&output::field("Status", &output::paid_badge(order.order_paid)));
            ctx.output
                .write(&output::field("Placed", &output::timestamp(order.order_placed, "-")));
            Ok(())
        }
        OrdersCommands::Create(fields) => {
            let draft = draft_from(ctx, fields, None)?;
            create::<T, Order>(ctx, &draft).await
        }
        OrdersCommands::Update { id, fields } => {
            let current: Order = ctx.fetcher().fetch_one(id).await?;
            let draft = draft_from(ctx, fields, Some(&current))?;
            update::<T, Order>(ctx, id, &draft).await
        }
        OrdersCommands::Delete { id } => remove::<T, Order>(ctx, id).await,
    }
}

/// Print the orders list at `location` followed by its totals
pub(crate) async fn list_at<T: Transport>(ctx: &Context<'_, T>, location: &str) -> Result<()> {
    let orders = load_list::<T, Order>(ctx, location).await?;
    print_list(ctx, &orders, |order| output::order_row(order, ctx.quiet));
    if !orders.items().is_empty() {
        ctx.output
            .info(&output::order_stats(&OrderStats::from_orders(orders.items())));
    }
    Ok(())
}

/// Assemble a draft from flags, prompting for whatever is missing
fn draft_from<T: Transport>(ctx: &Context<'_, T>, fields: &OrderFields, current: Option<&Order>) -> Result<OrderDraft> {
    let base = current.map(OrderDraft::from);

    let user_id = ctx.value_or_ask(
        fields.user_id.as_ref(),
        "User ID",
        base.as_ref().map(|d| d.user_id.as_str()),
    )?;

    let order_total = match fields.total {
        Some(total) => total,
        None => {
            let default = base.as_ref().map_or_else(|| "0".to_string(), |d| d.order_total.to_string());
            let raw = ctx.ask("Order total", Some(default.as_str()))?;
            raw.trim()
                .parse::<f64>()
                .map_err(|_| InputError::Invalid(format!("'{raw}' is not an amount")))?
        }
    };

    let order_placed = match &fields.placed {
        Some(raw) => parse_timestamp(raw).map_err(ValidationError::InvalidDate)?,
        None => base.as_ref().map_or_else(Utc::now, |d| d.order_placed),
    };

    let order_paid = match fields.paid {
        Some(paid) => paid,
        None => {
            let default = base.as_ref().is_some_and(|d| d.order_paid);
            required(ctx.input.prompt_confirm("Paid?", default)?)?
        }
    };

    Ok(OrderDraft {
        user_id,
        order_total,
        order_placed,
        order_paid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::cli::ListArgs;
    use crate::commands::fixtures::Harness;
    use crate::query::StatusFilter;
    use crate::ui::MessageLevel;
    use crate::ui::mock::{Answer, ScriptedInput};
    use serde_json::json;

    fn orders() -> serde_json::Value {
        json!({
            "items": [
                { "id": "o1", "userId": "u1", "orderTotal": 10.0, "orderPaid": true },
                { "id": "o2", "userId": "u2", "orderTotal": 20.0, "orderPaid": false },
                { "id": "o3", "userId": "u3", "orderTotal": 5.0, "orderPaid": false }
            ],
            "totalCount": 23,
            "hasNext": true
        })
    }

    #[tokio::test]
    async fn test_status_filter_is_local() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_json(200, orders());

        let command = OrdersCommands::List {
            list: ListArgs {
                query: Some("u".to_string()),
                page: 2,
            },
            status: StatusFilter::Unpaid,
        };
        execute(&harness.context(), &command).await.unwrap();

        assert_eq!(
            harness.lines(MessageLevel::Normal),
            vec!["o2\t20\tunpaid", "o3\t5\tunpaid"]
        );
        let info = harness.lines(MessageLevel::Info);
        assert!(info.contains(&"Page 2/3 · 23 orders · matching \"u\" · unpaid".to_string()));
        assert!(info.contains(&"2 orders · $25.00 revenue · 0 paid · 2 pending".to_string()));

        let request = &harness.transport().requests()[0];
        assert_eq!(request.query_param("offset"), Some("10"));
        assert_eq!(request.query_param("search"), Some("u"));
        assert_eq!(request.query_param("status"), None);
    }

    #[tokio::test]
    async fn test_create_order() {
        let input = ScriptedInput::new([
            Answer::Text("u7".to_string()),
            Answer::Text("42.5".to_string()),
            Answer::Confirm(true),
        ]);
        let harness = Harness::new(input);
        harness.transport().push_json(200, json!({ "orderId": "o9" }));
        harness
            .transport()
            .push_json(200, json!({ "items": [], "totalCount": 12, "hasNext": true }));

        execute(&harness.context(), &OrdersCommands::Create(OrderFields::default()))
            .await
            .unwrap();

        let request = &harness.transport().requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://localhost/api/order");
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["userId"], "u7");
        assert_eq!(body["orderTotal"], 42.5);
        assert_eq!(body["orderPaid"], true);
        assert!(body["orderPlaced"].is_string());
        assert_eq!(
            harness.lines(MessageLevel::Info),
            vec!["Order id: o9", "Page 1/2 · 12 orders · all"]
        );

        let reload = &harness.transport().requests()[1];
        assert_eq!(reload.url, "http://localhost/api/order/all");
        assert_eq!(reload.query_param("offset"), Some("0"));
    }

    #[tokio::test]
    async fn test_negative_total_is_rejected_locally() {
        let harness = Harness::new(ScriptedInput::default());
        let fields = OrderFields {
            user_id: Some("u1".to_string()),
            total: Some(-1.0),
            placed: None,
            paid: Some(false),
        };

        let err = execute(&harness.context(), &OrdersCommands::Create(fields))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Order total cannot be negative");
        assert!(harness.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unchanged_fields() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_json(
            200,
            json!({
                "id": "o1", "userId": "u1", "orderTotal": 10.0,
                "orderPlaced": "2025-02-02T10:00:00Z", "orderPaid": false
            }),
        );
        harness.transport().push_empty(204);

        let fields = OrderFields {
            user_id: Some("u1".to_string()),
            total: Some(10.0),
            placed: None,
            paid: Some(true),
        };
        let command = OrdersCommands::Update {
            id: "o1".to_string(),
            fields,
        };
        execute(&harness.context(), &command).await.unwrap();

        let request = &harness.transport().requests()[1];
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url, "http://localhost/api/order/o1");
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["orderPaid"], true);
        assert_eq!(body["orderPlaced"], "2025-02-02T10:00:00+00:00");
        assert_eq!(harness.lines(MessageLevel::Success), vec!["Order updated successfully"]);
    }

    #[tokio::test]
    async fn test_server_rejection_is_reported() {
        let harness = Harness::new(ScriptedInput::default());
        harness
            .transport()
            .push_json(200, json!({ "success": false, "message": "User does not exist" }));
        let fields = OrderFields {
            user_id: Some("ghost".to_string()),
            total: Some(1.0),
            placed: Some("2025-01-01".to_string()),
            paid: Some(false),
        };

        let err = execute(&harness.context(), &OrdersCommands::Create(fields))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User does not exist");
    }
}
