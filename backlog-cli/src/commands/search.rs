use backlog_scraper::validate::validate_query;
use backlog_scraper::{CatalogClient, CatalogService};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::AppContext;

use super::truncate_str;

/// Search IGDB (or the local catalog) and print the hits.
pub(crate) async fn run_search(
    ctx: &AppContext,
    query: &str,
    json: bool,
    local: bool,
) -> Result<(), CliError> {
    let results = if local {
        let query = validate_query(query)?;
        let conn = ctx.connect()?;
        backlog_db::search_catalog(&conn, query)?
    } else {
        let service = CatalogService::new(&ctx.credentials, &ctx.services);
        service.search(query).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        log::info!("No games found for '{}'", query.trim());
        return Ok(());
    }

    for entry in &results {
        log::info!(
            "  {:>10}  {}  {}",
            entry.external_id.if_supports_color(Stdout, |t| t.cyan()),
            truncate_str(&entry.title, 50).if_supports_color(Stdout, |t| t.bold()),
            entry
                .platform
                .as_deref()
                .unwrap_or("")
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();
    log::info!("{} results", results.len());
    Ok(())
}
