use backlog_catalog::{AcquisitionType, LibraryItemStatus};
use backlog_db::AttachOutcome;
use backlog_scraper::CatalogService;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::AppContext;

/// Add one game to the library by IGDB id.
pub(crate) async fn run_add(
    ctx: &AppContext,
    igdb_id: &str,
    status: LibraryItemStatus,
    acquisition: &str,
) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    let service = CatalogService::new(&ctx.credentials, &ctx.services);

    let outcome = backlog_import::add_to_library(
        &conn,
        &service,
        ctx.user_id(),
        igdb_id,
        status,
        AcquisitionType::from_str_loose(acquisition),
    )
    .await?;

    match outcome.attach {
        AttachOutcome::Created(item_id) => log::info!(
            "  {} Added {} as {} (item {})",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            outcome.title.if_supports_color(Stdout, |t| t.bold()),
            status.display_name(),
            item_id,
        ),
        AttachOutcome::AlreadyPresent => log::info!(
            "  {} {} is already in the library",
            "\u{2022}".if_supports_color(Stdout, |t| t.dimmed()),
            outcome.title.if_supports_color(Stdout, |t| t.bold()),
        ),
    }
    Ok(())
}
