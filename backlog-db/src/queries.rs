//! Read queries for the library database.
//!
//! Every query over `library_items` goes through [`ACTIVE_ITEM`] (or
//! [`ACTIVE_ROW`] when the table is not aliased) so soft-deleted rows are
//! excluded the same way everywhere, writes included.

use backlog_catalog::types::*;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::operations::OperationError;

/// SQL predicate selecting library items that have not been soft-deleted.
/// Written against the `li` alias.
pub const ACTIVE_ITEM: &str = "li.deleted_at IS NULL";

/// [`ACTIVE_ITEM`] for statements that name `library_items` without an alias.
pub const ACTIVE_ROW: &str = "deleted_at IS NULL";

const CATALOG_COLUMNS: &str =
    "id, source, external_id, title, platform, cover_url, completion_hours";

const ITEM_COLUMNS: &str = "li.id, li.user_id, li.catalog_entry_id, li.status, li.acquisition_type,
     li.platform, li.playtime_hours, li.rating, li.review, li.created_at, li.updated_at, li.deleted_at";

// ── Catalog Lookups ─────────────────────────────────────────────────────────

/// Find a catalog entry by local id.
pub fn find_catalog_entry(conn: &Connection, id: i64) -> Result<Option<CatalogEntry>, OperationError> {
    let sql = format!("SELECT {CATALOG_COLUMNS} FROM catalog_entries WHERE id = ?1");
    conn.query_row(&sql, params![id], row_to_catalog_entry)
        .optional()
        .map_err(Into::into)
}

/// Find a catalog entry by its provider identity.
pub fn find_catalog_entry_by_external(
    conn: &Connection,
    source: CatalogSource,
    external_id: &str,
) -> Result<Option<CatalogEntry>, OperationError> {
    let sql = format!(
        "SELECT {CATALOG_COLUMNS} FROM catalog_entries WHERE source = ?1 AND external_id = ?2"
    );
    conn.query_row(&sql, params![source.as_str(), external_id], row_to_catalog_entry)
        .optional()
        .map_err(Into::into)
}

/// All catalog entries in insertion order.
pub fn list_catalog_entries(conn: &Connection) -> Result<Vec<CatalogEntry>, OperationError> {
    let sql = format!("SELECT {CATALOG_COLUMNS} FROM catalog_entries ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_catalog_entry)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Search local catalog entries by title (case-insensitive LIKE).
pub fn search_catalog(conn: &Connection, query: &str) -> Result<Vec<CatalogEntry>, OperationError> {
    let pattern = format!("%{}%", query);
    let sql = format!(
        "SELECT {CATALOG_COLUMNS} FROM catalog_entries WHERE title LIKE ?1 ORDER BY title LIMIT 100"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![pattern], row_to_catalog_entry)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Library Lookups ─────────────────────────────────────────────────────────

/// A library item joined with the catalog fields shown alongside it.
#[derive(Debug, Clone)]
pub struct LibraryRow {
    pub item: LibraryItem,
    pub title: String,
    pub cover_url: Option<String>,
    pub completion_hours: Option<f64>,
}

/// List a user's active items, optionally restricted to one status.
pub fn list_library(
    conn: &Connection,
    user_id: &str,
    status: Option<LibraryItemStatus>,
) -> Result<Vec<LibraryRow>, OperationError> {
    let sql = format!(
        "SELECT {ITEM_COLUMNS}, ce.title, ce.cover_url, ce.completion_hours
         FROM library_items li JOIN catalog_entries ce ON ce.id = li.catalog_entry_id
         WHERE li.user_id = ?1 AND {ACTIVE_ITEM} AND (?2 IS NULL OR li.status = ?2)
         ORDER BY ce.title COLLATE NOCASE, li.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, status.map(|s| s.as_str())], |row| {
        Ok(LibraryRow {
            item: row_to_library_item(row)?,
            title: row.get(12)?,
            cover_url: row.get(13)?,
            completion_hours: row.get(14)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// The user's active item for a catalog entry, if any.
pub fn find_active_library_item(
    conn: &Connection,
    user_id: &str,
    catalog_entry_id: i64,
) -> Result<Option<LibraryItem>, OperationError> {
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM library_items li
         WHERE li.user_id = ?1 AND li.catalog_entry_id = ?2 AND {ACTIVE_ITEM}"
    );
    conn.query_row(&sql, params![user_id, catalog_entry_id], row_to_library_item)
        .optional()
        .map_err(Into::into)
}

/// Fetch a library item by id, deleted or not.
pub fn get_library_item(conn: &Connection, item_id: i64) -> Result<Option<LibraryItem>, OperationError> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM library_items li WHERE li.id = ?1");
    conn.query_row(&sql, params![item_id], row_to_library_item)
        .optional()
        .map_err(Into::into)
}

/// Active items whose catalog entry is missing completion time or cover art.
pub fn items_to_enrich(
    conn: &Connection,
    user_id: &str,
    limit: Option<u32>,
) -> Result<Vec<LibraryItem>, OperationError> {
    let limit = limit.unwrap_or(u32::MAX);
    let sql = format!(
        "SELECT {ITEM_COLUMNS}
         FROM library_items li JOIN catalog_entries ce ON ce.id = li.catalog_entry_id
         WHERE li.user_id = ?1 AND {ACTIVE_ITEM}
           AND (ce.completion_hours IS NULL OR ce.cover_url IS NULL)
         ORDER BY li.id LIMIT {limit}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_library_item)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Journal Lookups ─────────────────────────────────────────────────────────

const JOURNAL_COLUMNS: &str = "je.id, je.user_id, je.catalog_entry_id, je.library_item_id, je.title,
     je.content, je.mood, je.play_session, je.visibility, je.published_at, je.created_at, je.updated_at";

/// A journal entry with the title of the game it is about.
#[derive(Debug, Clone)]
pub struct JournalRow {
    pub entry: JournalEntry,
    pub game_title: String,
}

/// Fetch a journal entry by id.
pub fn get_journal_entry(conn: &Connection, entry_id: i64) -> Result<Option<JournalEntry>, OperationError> {
    let sql = format!("SELECT {JOURNAL_COLUMNS} FROM journal_entries je WHERE je.id = ?1");
    conn.query_row(&sql, params![entry_id], row_to_journal_entry)
        .optional()
        .map_err(Into::into)
}

/// A user's journal, newest first, optionally for one game only.
pub fn list_journal_entries(
    conn: &Connection,
    user_id: &str,
    catalog_entry_id: Option<i64>,
    limit: Option<u32>,
    offset: u32,
) -> Result<Vec<JournalRow>, OperationError> {
    let limit = limit.unwrap_or(u32::MAX);
    let sql = format!(
        "SELECT {JOURNAL_COLUMNS}, ce.title
         FROM journal_entries je JOIN catalog_entries ce ON ce.id = je.catalog_entry_id
         WHERE je.user_id = ?1 AND (?2 IS NULL OR je.catalog_entry_id = ?2)
         ORDER BY je.created_at DESC, je.id DESC
         LIMIT {limit} OFFSET {offset}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, catalog_entry_id], |row| {
        Ok(JournalRow {
            entry: row_to_journal_entry(row)?,
            game_title: row.get(12)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Ignored Candidates ──────────────────────────────────────────────────────

/// Titles the user excluded from imports, alphabetically.
pub fn list_ignored_candidates(
    conn: &Connection,
    user_id: &str,
) -> Result<Vec<IgnoredImportCandidate>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, title, created_at FROM ignored_import_candidates
         WHERE user_id = ?1 ORDER BY title COLLATE NOCASE",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(IgnoredImportCandidate {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary of a user's library.
#[derive(Debug, Default)]
pub struct LibraryStats {
    pub total: i64,
    /// Count per status, every status present (zero if unused).
    pub by_status: Vec<(LibraryItemStatus, i64)>,
    pub hours_played: f64,
    /// Summed completion estimates of items still in the backlog.
    pub backlog_hours: f64,
    /// Backlog items with no completion estimate yet.
    pub backlog_unestimated: i64,
}

impl LibraryStats {
    pub fn count(&self, status: LibraryItemStatus) -> i64 {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Per-status counts and hour totals over a user's active items.
pub fn library_stats(conn: &Connection, user_id: &str) -> Result<LibraryStats, OperationError> {
    let mut stats = LibraryStats {
        by_status: LibraryItemStatus::ALL.iter().map(|s| (*s, 0)).collect(),
        ..Default::default()
    };

    let sql = format!(
        "SELECT li.status, COUNT(*), COALESCE(SUM(li.playtime_hours), 0),
                COALESCE(SUM(ce.completion_hours), 0),
                SUM(CASE WHEN ce.completion_hours IS NULL THEN 1 ELSE 0 END)
         FROM library_items li JOIN catalog_entries ce ON ce.id = li.catalog_entry_id
         WHERE li.user_id = ?1 AND {ACTIVE_ITEM}
         GROUP BY li.status"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![user_id])?;
    while let Some(row) = rows.next()? {
        let status = parse_status(row, 0)?;
        let count: i64 = row.get(1)?;
        let played: f64 = row.get(2)?;
        let estimated: f64 = row.get(3)?;
        let unestimated: i64 = row.get(4)?;

        stats.total += count;
        stats.hours_played += played;
        if status.is_backlog() {
            stats.backlog_hours += estimated;
            stats.backlog_unestimated += unestimated;
        }
        if let Some(slot) = stats.by_status.iter_mut().find(|(s, _)| *s == status) {
            slot.1 = count;
        }
    }

    Ok(stats)
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List a user's most recent import runs.
pub fn list_import_logs(
    conn: &Connection,
    user_id: &str,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, user_id, source, account, imported_at,
                games_fetched, games_imported, games_skipped, catalog_created
         FROM import_log WHERE user_id = ?1 ORDER BY imported_at DESC, id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            user_id: row.get(1)?,
            source: row.get(2)?,
            account: row.get(3)?,
            imported_at: row.get(4)?,
            games_fetched: row.get(5)?,
            games_imported: row.get(6)?,
            games_skipped: row.get(7)?,
            catalog_created: row.get(8)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping ─────────────────────────────────────────────────────────────

fn row_to_catalog_entry(row: &Row<'_>) -> rusqlite::Result<CatalogEntry> {
    let source: String = row.get(1)?;
    Ok(CatalogEntry {
        id: row.get(0)?,
        source: CatalogSource::from_str_loose(&source),
        external_id: row.get(2)?,
        title: row.get(3)?,
        platform: row.get(4)?,
        cover_url: row.get(5)?,
        completion_hours: row.get(6)?,
    })
}

fn row_to_library_item(row: &Row<'_>) -> rusqlite::Result<LibraryItem> {
    let acquisition: String = row.get(4)?;
    Ok(LibraryItem {
        id: row.get(0)?,
        user_id: row.get(1)?,
        catalog_entry_id: row.get(2)?,
        status: parse_status(row, 3)?,
        acquisition_type: AcquisitionType::from_str_loose(&acquisition),
        platform: row.get(5)?,
        playtime_hours: row.get(6)?,
        rating: row.get(7)?,
        review: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
        deleted_at: row.get(11)?,
    })
}

fn row_to_journal_entry(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    let mood: Option<String> = row.get(6)?;
    let mood = match mood {
        Some(raw) => Some(parse_text(raw, 6)?),
        None => None,
    };
    Ok(JournalEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        catalog_entry_id: row.get(2)?,
        library_item_id: row.get(3)?,
        title: row.get(4)?,
        content: row.get(5)?,
        mood,
        play_session: row.get(7)?,
        visibility: parse_text(row.get(8)?, 8)?,
        published_at: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

fn parse_status(row: &Row<'_>, idx: usize) -> rusqlite::Result<LibraryItemStatus> {
    parse_text(row.get(idx)?, idx)
}

fn parse_text<T: std::str::FromStr<Err = String>>(raw: String, idx: usize) -> rusqlite::Result<T> {
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}
