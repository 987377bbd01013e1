use backlog_import::{EnrichOptions, enrich_library};
use backlog_scraper::{CatalogService, HltbClient};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::progress;
use crate::settings::AppContext;

/// Backfill completion times and cover art across the library.
pub(crate) async fn run_enrich(
    ctx: &AppContext,
    limit: Option<u32>,
    concurrency: Option<usize>,
) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    let matcher = ctx.settings.matcher();
    let service = CatalogService::new(&ctx.credentials, &ctx.services);
    let hltb = HltbClient::new(&ctx.services, matcher)?;

    if ctx.credentials.igdb().is_err() {
        log::warn!("IGDB credentials are not configured; cover art lookups will fail");
    }

    let options = EnrichOptions {
        limit,
        concurrency: concurrency.unwrap_or(ctx.settings.enrich_concurrency),
        matcher,
        ..Default::default()
    };
    let reporter = progress::reporter(ctx.quiet);

    let stats = enrich_library(
        &conn,
        &service,
        &hltb,
        ctx.user_id(),
        &options,
        Some(&*reporter),
    )
    .await?;

    if stats.processed == 0 {
        log::info!("Every library item already has a completion time and cover art.");
        return Ok(());
    }

    crate::log_blank();
    log::info!(
        "{}",
        "Enrichment complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Processed:      {:>6}", stats.processed);
    log::info!("  Completion:     {:>6}", stats.completion_found);
    log::info!("  Cover art:      {:>6}", stats.artwork_found);
    log::info!("  Not found:      {:>6}", stats.nothing_found);
    if stats.errors > 0 {
        log::info!(
            "  Errors:         {:>6}",
            stats.errors.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    Ok(())
}
