use backlog_catalog::LibraryItemStatus;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::AppContext;

use super::{format_hours, truncate_str};

/// List active library items, optionally filtered by status.
pub(crate) fn run_library_list(
    ctx: &AppContext,
    status: Option<LibraryItemStatus>,
    json: bool,
) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    let rows = backlog_db::list_library(&conn, ctx.user_id(), status)?;

    if json {
        let items: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "id": row.item.id,
                    "title": row.title,
                    "status": row.item.status,
                    "acquisition_type": row.item.acquisition_type,
                    "platform": row.item.platform,
                    "playtime_hours": row.item.playtime_hours,
                    "completion_hours": row.completion_hours,
                    "cover_url": row.cover_url,
                    "rating": row.item.rating,
                    "review": row.item.review,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if rows.is_empty() {
        match status {
            Some(s) => log::info!("No games with status {}", s.display_name()),
            None => log::info!("The library is empty. Try 'backlog import steam'."),
        }
        return Ok(());
    }

    log::info!(
        "  {:>5}  {:<12} {:<44} {:>8} {:>8}",
        "ID".if_supports_color(Stdout, |t| t.bold()),
        "Status",
        "Title",
        "Played",
        "To beat",
    );
    for row in &rows {
        log::info!(
            "  {:>5}  {:<12} {:<44} {:>8} {:>8}",
            row.item.id,
            row.item.status.display_name(),
            truncate_str(&row.title, 44),
            format_hours(row.item.playtime_hours),
            format_hours(row.completion_hours),
        );
    }
    crate::log_blank();
    log::info!("{} games", rows.len());
    Ok(())
}

pub(crate) fn run_library_status(
    ctx: &AppContext,
    item_id: i64,
    status: LibraryItemStatus,
) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    backlog_db::update_library_status(&conn, ctx.user_id(), item_id, status)?;
    log::info!(
        "  {} Item {} is now {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        item_id,
        status.display_name(),
    );
    Ok(())
}

pub(crate) fn run_library_review(
    ctx: &AppContext,
    item_id: i64,
    rating: Option<u8>,
    text: Option<&str>,
) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    backlog_import::review_item(&conn, ctx.user_id(), item_id, rating, text)?;
    log::info!(
        "  {} Review saved for item {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        item_id,
    );
    Ok(())
}

/// Soft-delete an item; it drops out of every listing.
pub(crate) fn run_library_remove(ctx: &AppContext, item_id: i64) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    backlog_db::mark_deleted(&conn, ctx.user_id(), item_id)?;
    log::info!(
        "  {} Removed item {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        item_id,
    );
    Ok(())
}
