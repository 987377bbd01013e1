use backlog_catalog::types::*;
use backlog_db::*;
use rusqlite::Connection;

fn add_game(conn: &Connection, user: &str, title: &str, hours: Option<f64>, status: LibraryItemStatus) -> i64 {
    let mut entry = CatalogEntry::new(CatalogSource::Igdb, title.to_lowercase(), title);
    entry.completion_hours = hours;
    let entry_id = upsert_catalog_entry(conn, &entry).unwrap();
    let outcome = attach_library_item(
        conn,
        &NewLibraryItem {
            user_id: user.to_string(),
            catalog_entry_id: entry_id,
            status,
            acquisition_type: AcquisitionType::Digital,
            platform: None,
            playtime_hours: Some(1.5),
        },
    )
    .unwrap();
    match outcome {
        AttachOutcome::Created(id) => id,
        AttachOutcome::AlreadyPresent => panic!("duplicate test game {title}"),
    }
}

#[test]
fn list_library_filters_and_sorts() {
    let conn = open_memory().unwrap();
    add_game(&conn, "alice", "celeste", Some(8.0), LibraryItemStatus::Completed);
    add_game(&conn, "alice", "Axiom Verge", None, LibraryItemStatus::Exploring);
    add_game(&conn, "alice", "Bastion", Some(7.0), LibraryItemStatus::Exploring);
    add_game(&conn, "bob", "Hades", Some(22.0), LibraryItemStatus::Exploring);

    let all = list_library(&conn, "alice", None).unwrap();
    let titles: Vec<&str> = all.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Axiom Verge", "Bastion", "celeste"]);

    let exploring = list_library(&conn, "alice", Some(LibraryItemStatus::Exploring)).unwrap();
    assert_eq!(exploring.len(), 2);
    assert!(exploring.iter().all(|r| r.item.status == LibraryItemStatus::Exploring));
}

#[test]
fn find_by_external_identity() {
    let conn = open_memory().unwrap();
    let id = upsert_catalog_entry(&conn, &CatalogEntry::new(CatalogSource::Steam, "620", "Portal 2")).unwrap();

    let found = find_catalog_entry_by_external(&conn, CatalogSource::Steam, "620")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.source, CatalogSource::Steam);

    assert!(find_catalog_entry_by_external(&conn, CatalogSource::Igdb, "620").unwrap().is_none());
    assert!(find_catalog_entry(&conn, id + 100).unwrap().is_none());
}

#[test]
fn catalog_listing_and_search() {
    let conn = open_memory().unwrap();
    for (ext, title) in [("1", "Hades"), ("2", "Hades II"), ("3", "Celeste")] {
        upsert_catalog_entry(&conn, &CatalogEntry::new(CatalogSource::Igdb, ext, title)).unwrap();
    }

    let all = list_catalog_entries(&conn).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].title, "Hades");

    let found = search_catalog(&conn, "hades").unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn items_to_enrich_skips_complete_and_deleted() {
    let conn = open_memory().unwrap();
    let missing = add_game(&conn, "alice", "Hollow Knight", None, LibraryItemStatus::Exploring);
    // Has hours but no cover, still needs artwork.
    let no_cover = add_game(&conn, "alice", "Celeste", Some(8.0), LibraryItemStatus::Exploring);
    let deleted = add_game(&conn, "alice", "Bastion", None, LibraryItemStatus::Exploring);
    mark_deleted(&conn, "alice", deleted).unwrap();

    let mut complete = CatalogEntry::new(CatalogSource::Igdb, "hades", "Hades");
    complete.completion_hours = Some(22.0);
    complete.cover_url = Some("https://example.test/hades.jpg".to_string());
    let complete_id = upsert_catalog_entry(&conn, &complete).unwrap();
    attach_library_item(
        &conn,
        &NewLibraryItem {
            user_id: "alice".to_string(),
            catalog_entry_id: complete_id,
            status: LibraryItemStatus::Exploring,
            acquisition_type: AcquisitionType::Digital,
            platform: None,
            playtime_hours: None,
        },
    )
    .unwrap();

    let ids: Vec<i64> = items_to_enrich(&conn, "alice", None)
        .unwrap()
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![missing, no_cover]);

    assert_eq!(items_to_enrich(&conn, "alice", Some(1)).unwrap().len(), 1);
}

#[test]
fn stats_count_statuses_and_hours() {
    let conn = open_memory().unwrap();
    add_game(&conn, "alice", "Hades", Some(22.0), LibraryItemStatus::InProgress);
    add_game(&conn, "alice", "Celeste", Some(8.0), LibraryItemStatus::Exploring);
    add_game(&conn, "alice", "Hollow Knight", None, LibraryItemStatus::Exploring);
    add_game(&conn, "alice", "Bastion", Some(7.0), LibraryItemStatus::Completed);
    let gone = add_game(&conn, "alice", "Transistor", Some(6.0), LibraryItemStatus::Exploring);
    mark_deleted(&conn, "alice", gone).unwrap();

    let stats = library_stats(&conn, "alice").unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.count(LibraryItemStatus::Exploring), 2);
    assert_eq!(stats.count(LibraryItemStatus::InProgress), 1);
    assert_eq!(stats.count(LibraryItemStatus::Completed), 1);
    assert_eq!(stats.count(LibraryItemStatus::Wishlist), 0);
    assert_eq!(stats.by_status.len(), LibraryItemStatus::ALL.len());
    assert!((stats.hours_played - 6.0).abs() < 1e-9);
    assert!((stats.backlog_hours - 30.0).abs() < 1e-9);
    assert_eq!(stats.backlog_unestimated, 1);
}

#[test]
fn stats_for_empty_library() {
    let conn = open_memory().unwrap();
    let stats = library_stats(&conn, "nobody").unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.hours_played, 0.0);
}
