//! Write operations for catalog entries, library items, journal entries, and
//! import tracking.

use backlog_catalog::types::*;
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::queries::ACTIVE_ROW;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

impl OperationError {
    fn library_item(id: i64) -> Self {
        Self::NotFound {
            entity_type: "library item".to_string(),
            id: id.to_string(),
        }
    }

    fn journal_entry(id: i64) -> Self {
        Self::NotFound {
            entity_type: "journal entry".to_string(),
            id: id.to_string(),
        }
    }
}

// ── Catalog Entry Operations ────────────────────────────────────────────────

/// Insert or update a catalog entry keyed by (source, external id).
///
/// The title always follows the incoming entry. Platform, cover, and
/// completion time are only replaced when the incoming entry carries a value,
/// so re-upserting a bare provider record never erases enrichment.
/// Returns the local row id.
pub fn upsert_catalog_entry(conn: &Connection, entry: &CatalogEntry) -> Result<i64, OperationError> {
    let id = conn.query_row(
        "INSERT INTO catalog_entries (source, external_id, title, platform, cover_url, completion_hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(source, external_id) DO UPDATE SET
             title = excluded.title,
             platform = COALESCE(excluded.platform, platform),
             cover_url = COALESCE(excluded.cover_url, cover_url),
             completion_hours = COALESCE(excluded.completion_hours, completion_hours),
             updated_at = datetime('now')
         RETURNING id",
        params![
            entry.source.as_str(),
            entry.external_id,
            entry.title,
            entry.platform,
            entry.cover_url,
            entry.completion_hours,
        ],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Fill in missing enrichment fields on a catalog entry.
///
/// Existing values are kept. Returns whether any column changed.
pub fn update_catalog_enrichment(
    conn: &Connection,
    entry_id: i64,
    completion_hours: Option<f64>,
    cover_url: Option<&str>,
) -> Result<bool, OperationError> {
    if completion_hours.is_none() && cover_url.is_none() {
        return Ok(false);
    }
    let changed = conn.execute(
        "UPDATE catalog_entries SET
             completion_hours = COALESCE(completion_hours, ?2),
             cover_url = COALESCE(cover_url, ?3),
             updated_at = datetime('now')
         WHERE id = ?1
           AND ((completion_hours IS NULL AND ?2 IS NOT NULL)
             OR (cover_url IS NULL AND ?3 IS NOT NULL))",
        params![entry_id, completion_hours, cover_url],
    )?;
    Ok(changed > 0)
}

// ── Library Item Operations ─────────────────────────────────────────────────

/// Result of attaching a game to a user's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// A new item was inserted with this id.
    Created(i64),
    /// The user already has an active item for this entry; nothing changed.
    AlreadyPresent,
}

/// Attach a catalog entry to a user's library unless an active item exists.
///
/// The insert is atomic against the active-item unique index, so two
/// concurrent imports cannot both create an item for the same game.
pub fn attach_library_item(
    conn: &Connection,
    item: &NewLibraryItem,
) -> Result<AttachOutcome, OperationError> {
    let changed = conn.execute(
        "INSERT INTO library_items (user_id, catalog_entry_id, status, acquisition_type, platform, playtime_hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT DO NOTHING",
        params![
            item.user_id,
            item.catalog_entry_id,
            item.status.as_str(),
            item.acquisition_type.as_str(),
            item.platform,
            item.playtime_hours,
        ],
    )?;
    if changed == 0 {
        Ok(AttachOutcome::AlreadyPresent)
    } else {
        Ok(AttachOutcome::Created(conn.last_insert_rowid()))
    }
}

/// Change the status of one of the user's active items.
pub fn update_library_status(
    conn: &Connection,
    user_id: &str,
    item_id: i64,
    status: LibraryItemStatus,
) -> Result<(), OperationError> {
    let sql = format!(
        "UPDATE library_items SET status = ?3, updated_at = datetime('now')
         WHERE id = ?1 AND user_id = ?2 AND {ACTIVE_ROW}"
    );
    let changed = conn.execute(&sql, params![item_id, user_id, status.as_str()])?;
    if changed == 0 {
        return Err(OperationError::library_item(item_id));
    }
    Ok(())
}

/// Set the rating and review text on one of the user's active items.
///
/// `None` leaves the corresponding column untouched.
pub fn update_library_review(
    conn: &Connection,
    user_id: &str,
    item_id: i64,
    rating: Option<u8>,
    review: Option<&str>,
) -> Result<(), OperationError> {
    let sql = format!(
        "UPDATE library_items SET
             rating = COALESCE(?3, rating),
             review = COALESCE(?4, review),
             updated_at = datetime('now')
         WHERE id = ?1 AND user_id = ?2 AND {ACTIVE_ROW}"
    );
    let changed = conn.execute(&sql, params![item_id, user_id, rating, review])?;
    if changed == 0 {
        return Err(OperationError::library_item(item_id));
    }
    Ok(())
}

/// Soft-delete one of the user's items.
///
/// The row stays for history; every query filters it out from here on.
pub fn mark_deleted(conn: &Connection, user_id: &str, item_id: i64) -> Result<(), OperationError> {
    let sql = format!(
        "UPDATE library_items SET deleted_at = datetime('now'), updated_at = datetime('now')
         WHERE id = ?1 AND user_id = ?2 AND {ACTIVE_ROW}"
    );
    let changed = conn.execute(&sql, params![item_id, user_id])?;
    if changed == 0 {
        return Err(OperationError::library_item(item_id));
    }
    Ok(())
}

// ── Journal Operations ──────────────────────────────────────────────────────

/// Write a journal entry. Public entries are published on creation.
pub fn create_journal_entry(conn: &Connection, entry: &NewJournalEntry) -> Result<i64, OperationError> {
    let id = conn.query_row(
        "INSERT INTO journal_entries (user_id, catalog_entry_id, library_item_id, title, content,
             mood, play_session, visibility, published_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8,
             CASE WHEN ?8 = 'public' THEN datetime('now') END)
         RETURNING id",
        params![
            entry.user_id,
            entry.catalog_entry_id,
            entry.library_item_id,
            entry.title,
            entry.content,
            entry.mood.map(|m| m.as_str()),
            entry.play_session,
            entry.visibility.as_str(),
        ],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Apply changes to one of the user's journal entries.
///
/// Going public stamps `published_at` once; going private clears it.
/// Another user's entry is reported as not found.
pub fn update_journal_entry(
    conn: &Connection,
    user_id: &str,
    entry_id: i64,
    update: &JournalUpdate,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE journal_entries SET
             title = COALESCE(?3, title),
             content = COALESCE(?4, content),
             mood = COALESCE(?5, mood),
             play_session = COALESCE(?6, play_session),
             visibility = COALESCE(?7, visibility),
             published_at = CASE ?7
                 WHEN 'public' THEN COALESCE(published_at, datetime('now'))
                 WHEN 'private' THEN NULL
                 ELSE published_at
             END,
             updated_at = datetime('now')
         WHERE id = ?1 AND user_id = ?2",
        params![
            entry_id,
            user_id,
            update.title,
            update.content,
            update.mood.map(|m| m.as_str()),
            update.play_session,
            update.visibility.map(|v| v.as_str()),
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::journal_entry(entry_id));
    }
    Ok(())
}

/// Delete one of the user's journal entries.
pub fn delete_journal_entry(conn: &Connection, user_id: &str, entry_id: i64) -> Result<(), OperationError> {
    let changed = conn.execute(
        "DELETE FROM journal_entries WHERE id = ?1 AND user_id = ?2",
        params![entry_id, user_id],
    )?;
    if changed == 0 {
        return Err(OperationError::journal_entry(entry_id));
    }
    Ok(())
}

// ── Ignored Candidate Operations ────────────────────────────────────────────

/// Record a title the user never wants imported. Returns false if it was already ignored.
pub fn add_ignored_candidate(
    conn: &Connection,
    user_id: &str,
    title: &str,
) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO ignored_import_candidates (user_id, title) VALUES (?1, ?2)",
        params![user_id, title],
    )?;
    Ok(changed > 0)
}

/// Remove an ignored title. Returns false if it was not ignored.
pub fn remove_ignored_candidate(
    conn: &Connection,
    user_id: &str,
    title: &str,
) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "DELETE FROM ignored_import_candidates WHERE user_id = ?1 AND title = ?2",
        params![user_id, title],
    )?;
    Ok(changed > 0)
}

// ── Import Log ──────────────────────────────────────────────────────────────

/// Record an import run.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (user_id, source, account, imported_at,
             games_fetched, games_imported, games_skipped, catalog_created)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            log.user_id,
            log.source,
            log.account,
            log.imported_at,
            log.games_fetched,
            log.games_imported,
            log.games_skipped,
            log.catalog_created,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
