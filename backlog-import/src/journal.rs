//! Journal entries written against library items.

use backlog_catalog::{JournalMood, JournalUpdate, JournalVisibility, NewJournalEntry};
use backlog_db::{operations, queries};
use rusqlite::Connection;

use crate::owned_import::{ImportError, require_user};

/// A journal entry as the user writes it.
#[derive(Debug, Clone, Default)]
pub struct JournalDraft {
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<JournalMood>,
    pub play_session: Option<u32>,
    pub visibility: JournalVisibility,
}

/// Write a journal entry about one of the user's active library items.
pub fn write_journal_entry(
    conn: &Connection,
    user_id: &str,
    item_id: i64,
    draft: &JournalDraft,
) -> Result<i64, ImportError> {
    let user_id = require_user(user_id)?;
    let content = required_content(&draft.content)?;
    check_session(draft.play_session)?;

    let item = queries::get_library_item(conn, item_id)?
        .filter(|item| item.user_id == user_id && item.is_active())
        .ok_or_else(|| ImportError::NotFound(format!("Library item {item_id}")))?;

    let id = operations::create_journal_entry(
        conn,
        &NewJournalEntry {
            user_id: user_id.to_string(),
            catalog_entry_id: item.catalog_entry_id,
            library_item_id: Some(item.id),
            title: optional_text(draft.title.as_deref()),
            content: content.to_string(),
            mood: draft.mood,
            play_session: draft.play_session,
            visibility: draft.visibility,
        },
    )?;
    log::debug!("Journal entry {} written for library item {}", id, item_id);
    Ok(id)
}

/// Change one of the user's journal entries.
pub fn edit_journal_entry(
    conn: &Connection,
    user_id: &str,
    entry_id: i64,
    update: &JournalUpdate,
) -> Result<(), ImportError> {
    let user_id = require_user(user_id)?;
    let update = JournalUpdate {
        title: optional_text(update.title.as_deref()),
        content: match update.content.as_deref() {
            Some(content) => Some(required_content(content)?.to_string()),
            None => None,
        },
        ..update.clone()
    };
    check_session(update.play_session)?;
    if update.is_empty() {
        return Err(ImportError::Validation(
            "nothing to update: give a title, content, mood, session or visibility".to_string(),
        ));
    }
    operations::update_journal_entry(conn, user_id, entry_id, &update)?;
    Ok(())
}

/// Delete one of the user's journal entries.
pub fn remove_journal_entry(conn: &Connection, user_id: &str, entry_id: i64) -> Result<(), ImportError> {
    let user_id = require_user(user_id)?;
    operations::delete_journal_entry(conn, user_id, entry_id)?;
    Ok(())
}

fn required_content(content: &str) -> Result<&str, ImportError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ImportError::Validation("journal content must not be empty".to_string()));
    }
    Ok(content)
}

fn optional_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

fn check_session(play_session: Option<u32>) -> Result<(), ImportError> {
    if play_session == Some(0) {
        return Err(ImportError::Validation("play session numbers start at 1".to_string()));
    }
    Ok(())
}
