use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::AppContext;

/// Print per-status counts, hours played and the estimated backlog.
pub(crate) fn run_stats(ctx: &AppContext) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    let stats = backlog_db::library_stats(&conn, ctx.user_id())?;

    log::info!(
        "{}",
        "Library Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  User: {}", ctx.user_id());
    crate::log_blank();
    for (status, count) in &stats.by_status {
        log::info!("  {:<14} {:>6}", format!("{}:", status.display_name()), count);
    }
    log::info!("  {:<14} {:>6}", "Total:", stats.total);
    crate::log_blank();
    log::info!("  Hours played:   {:>8.1}", stats.hours_played);
    log::info!("  Backlog hours:  {:>8.1}", stats.backlog_hours);
    if stats.backlog_unestimated > 0 {
        log::info!(
            "  {}",
            format!(
                "({} backlog games have no estimate yet; run 'backlog enrich')",
                stats.backlog_unestimated
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    if let Some(last) = backlog_db::list_import_logs(&conn, ctx.user_id(), Some(1))?.first() {
        crate::log_blank();
        log::info!(
            "  Last import: {} {} on {} ({} new of {})",
            last.source,
            last.account,
            last.imported_at,
            last.games_imported,
            last.games_fetched,
        );
    }
    Ok(())
}
