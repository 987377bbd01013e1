use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::AppContext;

pub(crate) fn run_ignore_add(ctx: &AppContext, title: &str) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    if backlog_import::ignore_title(&conn, ctx.user_id(), title)? {
        log::info!(
            "  {} Imports will skip '{}'",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            title.trim(),
        );
    } else {
        log::info!("'{}' is already ignored", title.trim());
    }
    Ok(())
}

pub(crate) fn run_ignore_remove(ctx: &AppContext, title: &str) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    if backlog_db::remove_ignored_candidate(&conn, ctx.user_id(), title.trim())? {
        log::info!(
            "  {} '{}' can be imported again",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            title.trim(),
        );
    } else {
        log::warn!("'{}' was not ignored", title.trim());
    }
    Ok(())
}

pub(crate) fn run_ignore_list(ctx: &AppContext) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    let ignored = backlog_db::list_ignored_candidates(&conn, ctx.user_id())?;
    if ignored.is_empty() {
        log::info!("No ignored titles.");
        return Ok(());
    }
    for candidate in &ignored {
        log::info!(
            "  {}  {}",
            candidate.title,
            candidate.created_at.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}
