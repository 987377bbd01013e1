use backlog_catalog::*;
use backlog_db::*;
use backlog_import::*;
use rusqlite::Connection;

const USER: &str = "alice";

fn with_item(user: &str) -> (Connection, i64) {
    let conn = open_memory().unwrap();
    let entry = upsert_catalog_entry(&conn, &CatalogEntry::new(CatalogSource::Igdb, "113112", "Hades")).unwrap();
    let AttachOutcome::Created(item_id) = attach_library_item(
        &conn,
        &NewLibraryItem {
            user_id: user.to_string(),
            catalog_entry_id: entry,
            status: LibraryItemStatus::InProgress,
            acquisition_type: AcquisitionType::Digital,
            platform: None,
            playtime_hours: None,
        },
    )
    .unwrap() else {
        panic!("expected a new item");
    };
    (conn, item_id)
}

fn draft(content: &str) -> JournalDraft {
    JournalDraft {
        content: content.to_string(),
        ..Default::default()
    }
}

#[test]
fn write_links_entry_to_item_and_game() {
    let (conn, item_id) = with_item(USER);
    let id = write_journal_entry(
        &conn,
        USER,
        item_id,
        &JournalDraft {
            title: Some("  Run 1  ".to_string()),
            mood: Some(JournalMood::Excited),
            play_session: Some(1),
            ..draft("  Reached Elysium.  ")
        },
    )
    .unwrap();

    let rows = list_journal_entries(&conn, USER, None, None, 0).unwrap();
    assert_eq!(rows.len(), 1);
    let entry = &rows[0].entry;
    assert_eq!(entry.id, id);
    assert_eq!(entry.library_item_id, Some(item_id));
    assert_eq!(entry.content, "Reached Elysium.");
    assert_eq!(entry.title.as_deref(), Some("Run 1"));
    assert_eq!(rows[0].game_title, "Hades");
}

#[test]
fn write_validates_input() {
    let (conn, item_id) = with_item(USER);

    let err = write_journal_entry(&conn, USER, item_id, &draft("   ")).unwrap_err();
    assert!(matches!(err, ImportError::Validation(_)));

    let zero = JournalDraft {
        play_session: Some(0),
        ..draft("Session zero")
    };
    let err = write_journal_entry(&conn, USER, item_id, &zero).unwrap_err();
    assert!(matches!(err, ImportError::Validation(_)));

    let err = write_journal_entry(&conn, "", item_id, &draft("text")).unwrap_err();
    assert!(matches!(err, ImportError::Unauthorized));

    assert!(list_journal_entries(&conn, USER, None, None, 0).unwrap().is_empty());
}

#[test]
fn write_requires_own_active_item() {
    let (conn, item_id) = with_item(USER);

    let err = write_journal_entry(&conn, "bob", item_id, &draft("Not my game")).unwrap_err();
    assert!(matches!(err, ImportError::NotFound(_)));

    mark_deleted(&conn, USER, item_id).unwrap();
    let err = write_journal_entry(&conn, USER, item_id, &draft("Gone")).unwrap_err();
    assert!(matches!(err, ImportError::NotFound(_)));
}

#[test]
fn edit_and_remove() {
    let (conn, item_id) = with_item(USER);
    let id = write_journal_entry(&conn, USER, item_id, &draft("Draft")).unwrap();

    let nothing = edit_journal_entry(&conn, USER, id, &JournalUpdate::default()).unwrap_err();
    assert!(matches!(nothing, ImportError::Validation(_)));
    let blank = JournalUpdate {
        content: Some(" ".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        edit_journal_entry(&conn, USER, id, &blank),
        Err(ImportError::Validation(_))
    ));

    let publish = JournalUpdate {
        content: Some("Final thoughts".to_string()),
        visibility: Some(JournalVisibility::Public),
        ..Default::default()
    };
    edit_journal_entry(&conn, USER, id, &publish).unwrap();
    let entry = get_journal_entry(&conn, id).unwrap().unwrap();
    assert_eq!(entry.content, "Final thoughts");
    assert!(entry.published_at.is_some());

    assert!(matches!(
        edit_journal_entry(&conn, "bob", id, &publish),
        Err(ImportError::Db(OperationError::NotFound { .. }))
    ));

    remove_journal_entry(&conn, USER, id).unwrap();
    assert!(get_journal_entry(&conn, id).unwrap().is_none());
}
