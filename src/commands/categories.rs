//! Categories command - list and maintain event categories

use super::{Context, Result, create, list_location, load_list, print_list, remove, update};
use crate::api::Transport;
use crate::cli::CategoriesCommands;
use crate::models::{Category, CategoryDraft};
use crate::output;
use crate::query::StatusFilter;

/// Execute a categories subcommand
///
/// # Errors
/// Returns an error if the request fails, a local check rejects the input,
/// or a prompt is cancelled
pub async fn execute<T: Transport>(ctx: &Context<'_, T>, command: &CategoriesCommands) -> Result<()> {
    match command {
        CategoriesCommands::List(args) => list_at(ctx, &list_location::<Category>(args, StatusFilter::All)).await,
        CategoriesCommands::Create { name } => {
            let draft = CategoryDraft {
                name: ctx.value_or_ask(name.as_ref(), "Category name", None)?,
            };
            create::<T, Category>(ctx, &draft).await
        }
        CategoriesCommands::Update { id, name } => {
            let name = match name {
                Some(name) => name.clone(),
                None => {
                    let current: Category = ctx.fetcher().fetch_one(id).await?;
                    ctx.ask("Category name", Some(current.name.as_str()))?
                }
            };
            update::<T, Category>(ctx, id, &CategoryDraft { name }).await
        }
        CategoriesCommands::Delete { id } => remove::<T, Category>(ctx, id).await,
    }
}

/// Print the categories list at `location`
pub(crate) async fn list_at<T: Transport>(ctx: &Context<'_, T>, location: &str) -> Result<()> {
    let list = load_list::<T, Category>(ctx, location).await?;
    print_list(ctx, &list, |category| output::category_row(category, ctx.quiet));
    Ok(())
}
