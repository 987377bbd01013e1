use backlog_db::open_memory;
use backlog_db::schema::{CURRENT_VERSION, create_schema, get_schema_version, open_database};

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "catalog_entries",
        "library_items",
        "ignored_import_candidates",
        "import_log",
        "journal_entries",
    ];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn reopen_on_disk_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO catalog_entries (source, external_id, title) VALUES ('steam', '1145360', 'Hades')",
            [],
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM catalog_entries", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn migrates_version_one_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.db");

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER NOT NULL, applied_at TEXT NOT NULL DEFAULT (datetime('now')));
             INSERT INTO schema_version (version) VALUES (1);
             CREATE TABLE catalog_entries (
                 id INTEGER PRIMARY KEY AUTOINCREMENT, source TEXT NOT NULL, external_id TEXT NOT NULL,
                 title TEXT NOT NULL, platform TEXT, cover_url TEXT, completion_hours REAL,
                 created_at TEXT NOT NULL DEFAULT (datetime('now')),
                 updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                 UNIQUE(source, external_id));
             CREATE TABLE library_items (
                 id INTEGER PRIMARY KEY AUTOINCREMENT, user_id TEXT NOT NULL,
                 catalog_entry_id INTEGER NOT NULL REFERENCES catalog_entries(id),
                 status TEXT NOT NULL DEFAULT 'exploring', acquisition_type TEXT NOT NULL DEFAULT 'digital',
                 platform TEXT, rating INTEGER, review TEXT,
                 created_at TEXT NOT NULL DEFAULT (datetime('now')),
                 updated_at TEXT NOT NULL DEFAULT (datetime('now')), deleted_at TEXT);",
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    let has_playtime: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM pragma_table_info('library_items') WHERE name = 'playtime_hours')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(has_playtime);
    assert!(table_exists(&conn, "journal_entries"));
}

#[test]
fn migrates_version_two_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v2.db");

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER NOT NULL, applied_at TEXT NOT NULL DEFAULT (datetime('now')));
             INSERT INTO schema_version (version) VALUES (2);
             CREATE TABLE catalog_entries (
                 id INTEGER PRIMARY KEY AUTOINCREMENT, source TEXT NOT NULL, external_id TEXT NOT NULL,
                 title TEXT NOT NULL, platform TEXT, cover_url TEXT, completion_hours REAL,
                 created_at TEXT NOT NULL DEFAULT (datetime('now')),
                 updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                 UNIQUE(source, external_id));
             CREATE TABLE library_items (
                 id INTEGER PRIMARY KEY AUTOINCREMENT, user_id TEXT NOT NULL,
                 catalog_entry_id INTEGER NOT NULL REFERENCES catalog_entries(id),
                 status TEXT NOT NULL DEFAULT 'exploring', acquisition_type TEXT NOT NULL DEFAULT 'digital',
                 platform TEXT, playtime_hours REAL, rating INTEGER, review TEXT,
                 created_at TEXT NOT NULL DEFAULT (datetime('now')),
                 updated_at TEXT NOT NULL DEFAULT (datetime('now')), deleted_at TEXT);
             INSERT INTO catalog_entries (source, external_id, title) VALUES ('steam', '620', 'Portal 2');",
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), 3);
    assert!(table_exists(&conn, "journal_entries"));
    let kept: String = conn
        .query_row("SELECT title FROM catalog_entries", [], |row| row.get(0))
        .unwrap();
    assert_eq!(kept, "Portal 2");
}

fn table_exists(conn: &rusqlite::Connection, table: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [table],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn newer_database_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }
    assert!(open_database(&path).is_err());
}
