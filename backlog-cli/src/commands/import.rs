use backlog_import::{ImportOptions, import_owned_games};
use backlog_scraper::CatalogService;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::progress;
use crate::settings::AppContext;

/// Import a Steam account's owned games into the library.
pub(crate) async fn run_import_steam(
    ctx: &AppContext,
    steam_id: Option<String>,
    include_non_games: bool,
    link_steam_apps: bool,
    api_key: Option<String>,
) -> Result<(), CliError> {
    let account = steam_id
        .or_else(|| ctx.settings.steam_account.clone())
        .ok_or_else(|| {
            CliError::config(
                "No Steam account given. Pass a SteamID64 or set steam_account in settings.toml",
            )
        })?;

    let credentials = ctx.credentials.clone().with_overrides(api_key);
    let service = CatalogService::new(&credentials, &ctx.services);
    let conn = ctx.connect()?;

    let options = ImportOptions {
        matcher: ctx.settings.matcher(),
        skip_non_games: !include_non_games,
        link_steam_apps,
        ..Default::default()
    };
    let reporter = progress::reporter(ctx.quiet);

    let stats = import_owned_games(
        &conn,
        &service,
        ctx.user_id(),
        &account,
        &options,
        Some(&*reporter),
    )
    .await?;

    crate::log_blank();
    log::info!(
        "{}",
        "Import complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Fetched:        {:>6}", stats.fetched);
    log::info!(
        "  Imported:       {:>6}",
        stats.imported.if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("  Skipped:        {:>6}", stats.skipped());
    if stats.skipped() > 0 {
        log::info!("    already owned {:>6}", stats.already_present);
        log::info!("    ignored       {:>6}", stats.skipped_ignored);
        log::info!("    not a game    {:>6}", stats.skipped_non_game);
    }
    log::info!(
        "  Catalog:        {:>6} matched, {} new ({} via IGDB links)",
        stats.catalog_matched,
        stats.catalog_created,
        stats.catalog_linked,
    );
    Ok(())
}
