//! SQLite persistence layer for the game library.
//!
//! Provides schema creation, write operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    AttachOutcome, OperationError, add_ignored_candidate, attach_library_item,
    create_journal_entry, delete_journal_entry, insert_import_log, mark_deleted,
    remove_ignored_candidate, update_catalog_enrichment, update_journal_entry,
    update_library_review, update_library_status, upsert_catalog_entry,
};
pub use queries::{
    ACTIVE_ITEM, ACTIVE_ROW, JournalRow, LibraryRow, LibraryStats, find_active_library_item,
    find_catalog_entry, find_catalog_entry_by_external, get_journal_entry, get_library_item,
    items_to_enrich, library_stats, list_catalog_entries, list_ignored_candidates,
    list_import_logs, list_journal_entries, list_library, search_catalog,
};
pub use schema::{SchemaError, open_database, open_memory};
