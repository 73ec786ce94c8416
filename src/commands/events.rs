//! Events command - list, inspect and maintain events

use super::{Context, Result, create, list_location, load_list, print_list, remove, update};
use crate::api::Transport;
use crate::cli::{EventFields, EventsCommands};
use crate::list::CategoryDirectory;
use crate::models::wire::parse_timestamp;
use crate::models::{Category, Event, EventDraft, Validate, ValidationError};
use crate::output;
use crate::query::StatusFilter;
use crate::ui::InputError;

/// Execute an events subcommand
///
/// # Errors
/// Returns an error if a request fails, a local check rejects the draft, or
/// a prompt is cancelled
pub async fn execute<T: Transport>(ctx: &Context<'_, T>, command: &EventsCommands) -> Result<()> {
    match command {
        EventsCommands::List(args) => list_at(ctx, &list_location::<Event>(args, StatusFilter::All)).await,
        EventsCommands::Show { id } => show(ctx, id).await,
        EventsCommands::Create(fields) => {
            let categories = ctx.categories().await?;
            let draft = draft_from(ctx, fields, None, &categories)?;
            create::<T, Event>(ctx, &draft).await
        }
        EventsCommands::Update { id, fields } => {
            let current: Event = ctx.fetcher().fetch_one(id).await?;
            let categories = ctx.categories().await?;
            let draft = draft_from(ctx, fields, Some(&current), &categories)?;
            update::<T, Event>(ctx, id, &draft).await
        }
        EventsCommands::Delete { id } => remove::<T, Event>(ctx, id).await,
        EventsCommands::Export { dir } => {
            super::export::execute(ctx, dir).await?;
            Ok(())
        }
    }
}

/// Print the events list at `location` with category names resolved
pub(crate) async fn list_at<T: Transport>(ctx: &Context<'_, T>, location: &str) -> Result<()> {
    if let Err(err) = ctx.categories().await {
        log::warn!("category names unavailable: {err}");
    }
    let list = load_list::<T, Event>(ctx, location).await?;
    print_list(ctx, &list, |event| {
        output::event_row(event, &category_name(event, &ctx.categories), ctx.quiet)
    });
    Ok(())
}

/// Embedded category name, else the directory's
pub(crate) fn category_name(event: &Event, directory: &CategoryDirectory) -> String {
    event
        .category
        .as_ref()
        .map_or_else(|| directory.name_of(&event.category_id), |c| c.name.clone())
}

async fn show<T: Transport>(ctx: &Context<'_, T>, id: &str) -> Result<()> {
    let event: Event = ctx.fetcher().fetch_one(id).await?;
    if event.category.is_none()
        && let Err(err) = ctx.categories().await
    {
        log::warn!("category names unavailable: {err}");
    }

    ctx.output.write(&format!("{} ({})", event.name, event.event_id));
    ctx.output.write(&output::field("Artist", &event.artist));
    ctx.output.write(&output::field("Price", &output::money(event.price)));
    ctx.output.write(&output::field("Date", &output::timestamp(event.date, "TBA")));
    ctx.output.write(&output::field("Category", &category_name(&event, &ctx.categories)));
    if !event.description.is_empty() {
        ctx.output.write(&output::field("Description", &event.description));
    }
    if let Some(url) = &event.image_url {
        ctx.output.write(&output::field("Image", url));
    }
    Ok(())
}

/// Assemble a draft from flags, prompting for whatever is missing
///
/// `current` supplies prompt defaults when editing. The draft is checked
/// locally, including that its category is one of `categories`.
fn draft_from<T: Transport>(
    ctx: &Context<'_, T>,
    fields: &EventFields,
    current: Option<&Event>,
    categories: &[Category],
) -> Result<EventDraft> {
    let name = ctx.value_or_ask(fields.name.as_ref(), "Name", current.map(|e| e.name.as_str()))?;
    let artist = ctx.value_or_ask(
        fields.artist.as_ref(),
        "Artist",
        Some(current.map_or("", |e| e.artist.as_str())),
    )?;

    let price = match fields.price {
        Some(price) => price,
        None => {
            let default = current.map_or_else(|| "0".to_string(), |e| e.price.to_string());
            let raw = ctx.ask("Price", Some(default.as_str()))?;
            raw.trim()
                .parse::<f64>()
                .map_err(|_| InputError::Invalid(format!("'{raw}' is not a price")))?
        }
    };

    let date = {
        let default = current
            .and_then(|e| e.date)
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let raw = ctx.value_or_ask(fields.date.as_ref(), "Date (YYYY-MM-DD HH:MM)", Some(default.as_str()))?;
        if raw.trim().is_empty() {
            None
        } else {
            Some(parse_timestamp(&raw).map_err(ValidationError::InvalidDate)?)
        }
    };

    let description = ctx.value_or_ask(
        fields.description.as_ref(),
        "Description",
        Some(current.map_or("", |e| e.description.as_str())),
    )?;

    let category_id = match &fields.category_id {
        Some(id) => id.clone(),
        None => pick_category(ctx, current, categories)?,
    };

    let image_url = ctx.value_or_ask(
        fields.image_url.as_ref(),
        "Image URL",
        Some(current.and_then(|e| e.image_url.as_deref()).unwrap_or("")),
    )?;

    let draft = EventDraft {
        name,
        price,
        date,
        artist,
        description,
        category_id,
        image_url: (!image_url.trim().is_empty()).then_some(image_url),
    };
    draft.validate()?;
    draft.validate_category(categories)?;
    Ok(draft)
}

/// Choose a category; the first one unless editing
fn pick_category<T: Transport>(
    ctx: &Context<'_, T>,
    current: Option<&Event>,
    categories: &[Category],
) -> Result<String> {
    if categories.is_empty() {
        return Ok(String::new());
    }
    let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
    let default = current
        .and_then(|e| categories.iter().position(|c| c.category_id == e.category_id))
        .unwrap_or(0);
    let index = crate::ui::input::required(ctx.input.prompt_select("Category", &names, Some(default))?)?;
    categories
        .get(index)
        .map(|c| c.category_id.clone())
        .ok_or_else(|| InputError::Invalid(format!("no category at {index}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::cli::ListArgs;
    use crate::commands::fixtures::Harness;
    use crate::ui::MessageLevel;
    use crate::ui::mock::{Answer, ScriptedInput};
    use serde_json::json;

    fn categories() -> serde_json::Value {
        json!([
            { "categoryId": "c1", "name": "Jazz" },
            { "categoryId": "c2", "name": "Rock" }
        ])
    }

    fn full_fields(category: &str) -> EventFields {
        EventFields {
            name: Some("Blue Note Night".to_string()),
            artist: Some("Quartet".to_string()),
            price: Some(25.0),
            date: Some("2025-06-01 20:00".to_string()),
            description: Some("Late set".to_string()),
            category_id: Some(category.to_string()),
            image_url: Some(String::new()),
        }
    }

    #[test]
    fn test_category_name_falls_back_to_unknown() {
        let directory = CategoryDirectory::new();
        directory.fill(serde_json::from_value::<Vec<Category>>(categories()).unwrap());

        let known: Event = serde_json::from_value(json!({ "eventId": "e1", "name": "A", "categoryId": "c2" })).unwrap();
        let orphan: Event = serde_json::from_value(json!({ "eventId": "e2", "name": "B", "categoryId": "c404" })).unwrap();
        assert_eq!(category_name(&known, &directory), "Rock");
        assert_eq!(category_name(&orphan, &directory), "Unknown");
    }

    #[tokio::test]
    async fn test_list_loads_categories_then_events() {
        let mut harness = Harness::new(ScriptedInput::default());
        harness.config.page_size = 5;
        harness.transport().push_json(200, categories());
        harness.transport().push_json(
            200,
            json!([
                { "eventId": "e1", "name": "Gala", "categoryId": "c2" },
                { "eventId": "e2", "name": "Mystery", "categoryId": "c404" }
            ]),
        );

        let command = EventsCommands::List(ListArgs { query: None, page: 1 });
        execute(&harness.context(), &command).await.unwrap();

        assert_eq!(harness.lines(MessageLevel::Normal), vec!["e1\tGala", "e2\tMystery"]);
        let requests = harness.transport().requests();
        assert_eq!(requests[0].url, "http://localhost/api/category/all");
        assert!(requests[0].query.is_empty());
        assert_eq!(requests[1].url, "http://localhost/api/event/all");
        assert_eq!(requests[1].query_param("limit"), Some("5"));
    }

    #[tokio::test]
    async fn test_list_survives_missing_categories() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_text(500, "categories down");
        harness
            .transport()
            .push_json(200, json!([{ "eventId": "e1", "name": "Gala", "categoryId": "c1" }]));

        let command = EventsCommands::List(ListArgs { query: None, page: 1 });
        execute(&harness.context(), &command).await.unwrap();

        assert_eq!(harness.lines(MessageLevel::Normal), vec!["e1\tGala"]);
    }

    #[tokio::test]
    async fn test_create_from_flags() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_json(200, categories());
        harness.transport().push_json(200, json!("e9"));

        execute(&harness.context(), &EventsCommands::Create(full_fields("c2")))
            .await
            .unwrap();

        let requests = harness.transport().requests();
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].url, "http://localhost/api/event");
        let body = requests[1].body.as_ref().unwrap();
        assert_eq!(body["categoryId"], "c2");
        assert_eq!(body["name"], "Blue Note Night");
        assert!(body.get("imageUrl").is_none());
        assert_eq!(harness.lines(MessageLevel::Success), vec!["Event created successfully"]);
    }

    #[tokio::test]
    async fn test_create_reuses_cached_categories() {
        let harness = Harness::new(ScriptedInput::default());
        harness
            .categories
            .fill(serde_json::from_value::<Vec<Category>>(categories()).unwrap());
        harness.transport().push_json(200, json!("e9"));

        execute(&harness.context(), &EventsCommands::Create(full_fields("c1")))
            .await
            .unwrap();

        let requests = harness.transport().requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "http://localhost/api/event");
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected_locally() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_json(200, categories());

        let err = execute(&harness.context(), &EventsCommands::Create(full_fields("c404")))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Selected category does not exist");
        assert_eq!(harness.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_name_is_rejected_locally() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_json(200, categories());
        let mut fields = full_fields("c1");
        fields.name = Some(String::new());

        let err = execute(&harness.context(), &EventsCommands::Create(fields))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Name and category are required");
        assert_eq!(harness.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_update_prompts_with_current_values() {
        let input = ScriptedInput::new([
            Answer::Text(String::new()),
            Answer::Text(String::new()),
            Answer::Text("30".to_string()),
            Answer::Text(String::new()),
            Answer::Text(String::new()),
            Answer::Select(1),
            Answer::Text(String::new()),
        ]);
        let harness = Harness::new(input);
        harness.transport().push_json(
            200,
            json!({
                "eventId": "e1", "name": "Gala", "artist": "Trio", "price": 10,
                "date": "2025-06-01T20:00:00Z", "categoryId": "c1"
            }),
        );
        harness.transport().push_json(200, categories());
        harness.transport().push_empty(204);

        let command = EventsCommands::Update {
            id: "e1".to_string(),
            fields: EventFields::default(),
        };
        execute(&harness.context(), &command).await.unwrap();

        let requests = harness.transport().requests();
        assert_eq!(requests[2].method, Method::Put);
        assert_eq!(requests[2].url, "http://localhost/api/event");
        let body = requests[2].body.as_ref().unwrap();
        assert_eq!(body["eventId"], "e1");
        assert_eq!(body["name"], "Gala");
        assert_eq!(body["artist"], "Trio");
        assert_eq!(body["price"], 30.0);
        assert_eq!(body["categoryId"], "c2");
        assert_eq!(
            harness.input.prompts(),
            vec![
                "Name",
                "Artist",
                "Price",
                "Date (YYYY-MM-DD HH:MM)",
                "Description",
                "Category",
                "Image URL"
            ]
        );
    }

    #[tokio::test]
    async fn test_bad_price_is_invalid_input() {
        let harness = Harness::new(ScriptedInput::texts(["Gala", "Trio", "cheap"]));
        harness.transport().push_json(200, categories());

        let err = execute(&harness.context(), &EventsCommands::Create(EventFields::default()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'cheap' is not a price"));
    }

    #[tokio::test]
    async fn test_show_uses_embedded_category() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_json(
            200,
            json!({
                "eventId": "e1", "name": "Gala", "price": 12.5, "categoryId": "c1",
                "category": { "categoryId": "c1", "name": "Jazz" }
            }),
        );

        execute(&harness.context(), &EventsCommands::Show { id: "e1".to_string() })
            .await
            .unwrap();

        let lines = harness.lines(MessageLevel::Normal);
        assert_eq!(lines[0], "Gala (e1)");
        assert!(lines.iter().any(|line| line.contains("Jazz")));
        assert!(lines.iter().any(|line| line.contains("$12.50")));
        assert_eq!(harness.transport().requests().len(), 1);
    }
}
