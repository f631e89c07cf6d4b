//! One-shot search and deep-link commands.

use tokio::runtime::Runtime;

use super::{AppContext, cmd_favorites, cmd_interactive};
use crate::cli::render;
use crate::routes::Route;

/// Search once and print the published results.
///
/// Goes through the same debounce-and-fetch path as typing, so the request
/// is sent after the configured quiet period.
pub fn cmd_search(rt: &Runtime, ctx: &AppContext, term: &str) -> anyhow::Result<()> {
    if term.trim().is_empty() {
        println!("Nothing to search for.");
        return Ok(());
    }

    let results = rt.block_on(async {
        let mut controller = ctx.search_controller();
        let mut published = controller.subscribe();

        controller.on_query_changed(term);
        published.changed().await?;

        let results = published.borrow_and_update().clone();
        anyhow::Ok(results)
    })?;

    render::print_results(&results, &ctx.favorites);
    Ok(())
}

/// Open a deep link: the search route starts an interactive session with
/// the linked term, the favorites route lists favorites.
pub fn cmd_open(rt: &Runtime, ctx: &mut AppContext, link: &str) -> anyhow::Result<()> {
    let route = Route::parse(link)?;
    tracing::info!(route = %route, "Opening link");

    match route {
        Route::Search { term } => cmd_interactive(rt, ctx, &term),
        Route::Favorites => {
            cmd_favorites(ctx);
            Ok(())
        }
    }
}
