use backlog_catalog::{JournalMood, JournalUpdate, JournalVisibility};
use backlog_import::JournalDraft;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::AppContext;

use super::truncate_str;

/// Write a journal entry about a library item.
pub(crate) fn run_journal_add(ctx: &AppContext, item_id: i64, draft: JournalDraft) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    let id = backlog_import::write_journal_entry(&conn, ctx.user_id(), item_id, &draft)?;
    log::info!(
        "  {} Journal entry {} saved ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        id,
        draft.visibility,
    );
    Ok(())
}

/// List journal entries, newest first.
pub(crate) fn run_journal_list(
    ctx: &AppContext,
    item_id: Option<i64>,
    limit: Option<u32>,
    offset: u32,
    json: bool,
) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    let catalog_entry_id = match item_id {
        Some(id) => Some(
            backlog_db::get_library_item(&conn, id)?
                .filter(|item| item.user_id == ctx.user_id())
                .map(|item| item.catalog_entry_id)
                .ok_or_else(|| backlog_import::ImportError::NotFound(format!("Library item {id}")))?,
        ),
        None => None,
    };
    let rows = backlog_db::list_journal_entries(&conn, ctx.user_id(), catalog_entry_id, limit, offset)?;

    if json {
        let entries: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "id": row.entry.id,
                    "game": row.game_title,
                    "library_item_id": row.entry.library_item_id,
                    "title": row.entry.title,
                    "content": row.entry.content,
                    "mood": row.entry.mood,
                    "play_session": row.entry.play_session,
                    "visibility": row.entry.visibility,
                    "published_at": row.entry.published_at,
                    "created_at": row.entry.created_at,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if rows.is_empty() {
        log::info!("No journal entries yet. Try 'backlog journal add <item> <text>'.");
        return Ok(());
    }

    for row in &rows {
        let entry = &row.entry;
        let mut header = format!("#{} {} {}", entry.id, entry.created_at, row.game_title);
        if let Some(session) = entry.play_session {
            header.push_str(&format!(", session {session}"));
        }
        if let Some(mood) = entry.mood {
            header.push_str(&format!(" ({mood})"));
        }
        log::info!("{}", header.if_supports_color(Stdout, |t| t.bold()));
        if let Some(title) = &entry.title {
            log::info!("  {}", title);
        }
        log::info!("  {}", truncate_str(&entry.content, 200));
        if entry.visibility != JournalVisibility::Private {
            log::info!("  [{}]", entry.visibility);
        }
        crate::log_blank();
    }
    log::info!("{} entries", rows.len());
    Ok(())
}

pub(crate) fn run_journal_edit(ctx: &AppContext, entry_id: i64, update: JournalUpdate) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    backlog_import::edit_journal_entry(&conn, ctx.user_id(), entry_id, &update)?;
    log::info!(
        "  {} Journal entry {} updated",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        entry_id,
    );
    Ok(())
}

pub(crate) fn run_journal_remove(ctx: &AppContext, entry_id: i64) -> Result<(), CliError> {
    let conn = ctx.connect()?;
    backlog_import::remove_journal_entry(&conn, ctx.user_id(), entry_id)?;
    log::info!(
        "  {} Removed journal entry {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        entry_id,
    );
    Ok(())
}

/// Build a draft from command-line arguments.
pub(crate) fn draft(
    content: String,
    title: Option<String>,
    mood: Option<JournalMood>,
    session: Option<u32>,
    visibility: JournalVisibility,
) -> JournalDraft {
    JournalDraft {
        title,
        content,
        mood,
        play_session: session,
        visibility,
    }
}
