//! Command implementations
//!
//! Each command is a module with an `execute` function that takes parsed CLI
//! args and runs the operation against the ticketing API. Prompts, messages
//! and confirmations go through the [`Context`], so the same code runs in a
//! terminal and under test.

pub mod account;
pub mod browse;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod export;
pub mod orders;
pub mod theme;

// Re-export execute functions for convenience
pub use account::execute as account;
pub use browse::{browse, open};
pub use categories::execute as categories;
pub use config::execute as config;
pub use dashboard::execute as dashboard;
pub use events::execute as events;
pub use orders::execute as orders;
pub use theme::execute as theme;

use crate::api::{ApiClient, Transport};
use crate::cli::ListArgs;
use crate::config::BoxofficeConfig;
use crate::list::{
    CategoryDirectory, Confirmer, ListFetcher, LoadState, MutationError, MutationKind, MutationOutcome, MutationReceipt,
    RemoteList, Resource,
};
use crate::output;
use crate::query::{DebouncedInputBuffer, History, QueryState, StatusFilter};
use crate::ui::input::required;
use crate::ui::{OutputWriter, UserInput};
use crate::BoxofficeError;
use std::sync::Arc;

type Result<T> = std::result::Result<T, BoxofficeError>;

/// Everything a command needs besides its arguments
pub struct Context<'a, T> {
    pub client: Arc<ApiClient<T>>,
    pub config: &'a BoxofficeConfig,
    pub output: &'a dyn OutputWriter,
    pub input: &'a dyn UserInput,
    /// Asked before deletes; auto-confirms with `--yes`
    pub confirmer: &'a dyn Confirmer,
    /// Category names shared by every event screen of this run
    pub categories: CategoryDirectory,
    pub quiet: bool,
}

impl<T: Transport> Context<'_, T> {
    #[must_use]
    pub fn fetcher(&self) -> ListFetcher<T> {
        ListFetcher::new(Arc::clone(&self.client)).with_page_size(self.config.page_size)
    }

    /// The shared category directory, loaded if nothing live is cached
    ///
    /// # Errors
    ///
    /// Returns the fetch error when the categories cannot be loaded.
    pub async fn categories(&self) -> Result<Vec<crate::models::Category>> {
        Ok(self.categories.ensure_loaded(&self.fetcher()).await?)
    }

    /// A list view positioned at `location`
    #[must_use]
    pub fn remote<R: Resource>(&self, location: &str) -> RemoteList<T, R, History> {
        let input = DebouncedInputBuffer::new(self.config.debounce()).with_min_len(self.config.search_min_length);
        RemoteList::new(Arc::clone(&self.client), History::new(location), input, self.config.page_size)
    }

    /// Ask for a line of text; cancelling aborts the command
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the prompt fails or is cancelled.
    pub fn ask(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        Ok(required(self.input.prompt_text(prompt, default, default.is_some())?)?)
    }

    /// Use `given` or ask for it
    ///
    /// # Errors
    ///
    /// Same as [`Self::ask`].
    pub fn value_or_ask(&self, given: Option<&String>, prompt: &str, default: Option<&str>) -> Result<String> {
        match given {
            Some(value) => Ok(value.clone()),
            None => self.ask(prompt, default),
        }
    }

    /// Ask for a hidden value
    ///
    /// # Errors
    ///
    /// Same as [`Self::ask`].
    pub fn ask_password(&self, prompt: &str) -> Result<String> {
        Ok(required(self.input.prompt_password(prompt)?)?)
    }
}

/// Location of the list view described by `args`
#[must_use]
pub fn list_location<R: Resource>(args: &ListArgs, status: StatusFilter) -> String {
    let search = args.query.clone().unwrap_or_default();
    QueryState::new(search, args.page.saturating_sub(1), status).to_location(&R::location_path())
}

/// Fetch the page at `location`; a failed fetch becomes the command's error
///
/// # Errors
///
/// Returns `BoxofficeError::Failed` with the list's error banner.
pub async fn load_list<T: Transport, R: Resource>(
    ctx: &Context<'_, T>,
    location: &str,
) -> Result<RemoteList<T, R, History>> {
    log::debug!("loading {location}");
    let mut list = ctx.remote::<R>(location);
    list.load().await;
    match list.controller_mut().take_banner() {
        Some(banner) => Err(BoxofficeError::Failed(banner.text)),
        None => Ok(list),
    }
}

/// Print the rows of a loaded list and its paging line
pub fn print_list<T, R>(ctx: &Context<'_, T>, list: &RemoteList<T, R, History>, row: impl Fn(&R) -> String)
where
    T: Transport,
    R: Resource,
{
    if list.items().is_empty() {
        ctx.output.info(&format!("No {} found", R::PLURAL));
    }
    for item in list.items() {
        ctx.output.write(&row(item));
    }
    let query = list.controller().query();
    ctx.output
        .info(&output::page_footer(list.page(), &query, list.fetcher().page_size()));
}

/// Report a finished mutation
///
/// A declined confirmation is reported and yields `None`.
///
/// # Errors
///
/// Returns `BoxofficeError::Failed` with the server's message, or the
/// generic fallback for `kind` when there is none.
pub fn settle<R, V>(
    ctx: &Context<'_, impl Transport>,
    kind: MutationKind,
    result: std::result::Result<V, MutationError>,
) -> Result<Option<MutationReceipt>>
where
    R: Resource,
    V: Into<MutationOutcome>,
{
    match result.map(Into::into) {
        Ok(MutationOutcome::Applied(receipt)) => {
            ctx.output.success(&kind.success_message::<R>());
            if let Some(id) = &receipt.id {
                ctx.output.info(&format!("{} id: {id}", R::LABEL));
            }
            Ok(Some(receipt))
        }
        Ok(MutationOutcome::Declined) => {
            ctx.output.info("Cancelled");
            Ok(None)
        }
        Err(err) => Err(BoxofficeError::Failed(err.message_or(&kind.fallback_message::<R>()))),
    }
}

/// Report a mutation made through `list`
///
/// An applied mutation has already reloaded the list's first page; its
/// paging line is shown, or a warning if the reload failed.
fn report<T, R, V>(
    ctx: &Context<'_, T>,
    kind: MutationKind,
    list: &RemoteList<T, R, History>,
    result: std::result::Result<V, MutationError>,
) -> Result<()>
where
    T: Transport,
    R: Resource,
    V: Into<MutationOutcome>,
{
    if settle::<R, _>(ctx, kind, result)?.is_none() {
        return Ok(());
    }
    let controller = list.controller();
    match controller.banner() {
        Some(banner) if controller.state() == LoadState::Failed => ctx.output.warning(&banner.text),
        _ => ctx.output.info(&output::page_footer(
            list.page(),
            &controller.query(),
            list.fetcher().page_size(),
        )),
    }
    Ok(())
}

/// Create `draft` from the first page of its list
///
/// # Errors
///
/// Same as [`settle`].
pub async fn create<T: Transport, R: Resource>(ctx: &Context<'_, T>, draft: &R::Draft) -> Result<()> {
    let mut list = ctx.remote::<R>(&R::location_path());
    let result = list.create(draft).await;
    report(ctx, MutationKind::Create, &list, result)
}

/// Replace entity `id` with `draft`
///
/// # Errors
///
/// Same as [`settle`].
pub async fn update<T: Transport, R: Resource>(ctx: &Context<'_, T>, id: &str, draft: &R::Draft) -> Result<()> {
    let mut list = ctx.remote::<R>(&R::location_path());
    let result = list.update(id, draft).await;
    report(ctx, MutationKind::Update, &list, result)
}

/// Delete `id` after confirmation
///
/// # Errors
///
/// Same as [`settle`].
pub async fn remove<T: Transport, R: Resource>(ctx: &Context<'_, T>, id: &str) -> Result<()> {
    let mut list = ctx.remote::<R>(&R::location_path());
    let result = list.remove(id, ctx.confirmer).await;
    report(ctx, MutationKind::Remove, &list, result)
}


#[cfg(test)]
mod tests {
    use super::fixtures::Harness;
    use super::*;
    use crate::list::AutoConfirm;
    use crate::models::{Category, Order};
    use crate::ui::MessageLevel;
    use crate::ui::mock::ScriptedInput;
    use serde_json::json;

    fn args(query: Option<&str>, page: u32) -> ListArgs {
        ListArgs {
            query: query.map(str::to_string),
            page,
        }
    }

    #[test]
    fn test_list_location() {
        assert_eq!(list_location::<Category>(&args(None, 1), StatusFilter::All), "/categories");
        assert_eq!(
            list_location::<Order>(&args(Some("vip"), 2), StatusFilter::Paid),
            "/orders?q=vip&page=2&status=paid"
        );
    }

    #[tokio::test]
    async fn test_load_list_prints_rows() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_json(
            200,
            json!({ "items": [{ "categoryId": "c1", "name": "Jazz" }], "totalCount": 1 }),
        );

        let ctx = harness.context();
        let list = load_list::<_, Category>(&ctx, "/categories?q=ja").await.unwrap();
        print_list(&ctx, &list, |c| output::category_row(c, true));

        assert_eq!(harness.lines(MessageLevel::Normal), vec!["c1\tJazz"]);
        let request = &harness.transport().requests()[0];
        assert_eq!(request.query_param("search"), Some("ja"));
    }

    #[tokio::test]
    async fn test_load_list_failure_is_an_error() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_text(500, "database offline");

        let err = load_list::<_, Category>(&harness.context(), "/categories")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "database offline");
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let mut harness = Harness::new(ScriptedInput::default());
        harness.confirmer = AutoConfirm::no();

        remove::<_, Category>(&harness.context(), "c1").await.unwrap();

        assert!(harness.transport().requests().is_empty());
        assert_eq!(harness.lines(MessageLevel::Info), vec!["Cancelled"]);
    }

    #[tokio::test]
    async fn test_delete_reloads_first_page() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_empty(204);
        harness.transport().push_json(
            200,
            json!({ "items": [{ "categoryId": "c2", "name": "Rock" }], "totalCount": 1 }),
        );

        remove::<_, Category>(&harness.context(), "c1").await.unwrap();

        let requests = harness.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].url, "http://localhost/api/category/all");
        assert_eq!(requests[1].query_param("offset"), Some("0"));
        assert_eq!(harness.lines(MessageLevel::Info), vec!["Page 1/1 · 1 categories"]);
    }

    #[tokio::test]
    async fn test_failed_reload_after_create_is_a_warning() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_json(200, json!("c9"));
        harness.transport().push_text(500, "list offline");

        let draft = crate::models::CategoryDraft {
            name: "Opera".to_string(),
        };
        create::<_, Category>(&harness.context(), &draft).await.unwrap();

        assert_eq!(harness.lines(MessageLevel::Success), vec!["Category created successfully"]);
        assert_eq!(harness.lines(MessageLevel::Warning), vec!["list offline"]);
    }

    #[tokio::test]
    async fn test_failed_delete_uses_fallback() {
        let harness = Harness::new(ScriptedInput::default());
        harness.transport().push_error("");

        let err = remove::<_, Category>(&harness.context(), "c1").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete category");
    }
}
