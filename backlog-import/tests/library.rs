mod common;

use backlog_catalog::{AcquisitionType, LibraryItemStatus};
use backlog_db::*;
use backlog_import::*;
use common::*;

const USER: &str = "alice";

fn catalog_knowing(id: &str, title: &str) -> FakeCatalog {
    let mut catalog = FakeCatalog::default();
    catalog.by_id.insert(
        id.to_string(),
        igdb_entry(id.parse().unwrap(), title, Some("https://img/cover.jpg")),
    );
    catalog
}

#[tokio::test]
async fn add_creates_item() {
    let conn = open_memory().unwrap();
    let catalog = catalog_knowing("113112", "Hades");

    let outcome = add_to_library(
        &conn,
        &catalog,
        USER,
        "113112",
        LibraryItemStatus::Wishlist,
        AcquisitionType::Physical,
    )
    .await
    .unwrap();
    assert_eq!(outcome.title, "Hades");
    assert!(matches!(outcome.attach, AttachOutcome::Created(_)));

    let rows = list_library(&conn, USER, Some(LibraryItemStatus::Wishlist)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item.acquisition_type, AcquisitionType::Physical);
    assert_eq!(rows[0].cover_url.as_deref(), Some("https://img/cover.jpg"));
}

#[tokio::test]
async fn add_twice_reports_already_present() {
    let conn = open_memory().unwrap();
    let catalog = catalog_knowing("113112", "Hades");

    let first = add_to_library(&conn, &catalog, USER, "113112", LibraryItemStatus::Exploring, AcquisitionType::Digital)
        .await
        .unwrap();
    let second = add_to_library(&conn, &catalog, USER, "113112", LibraryItemStatus::Completed, AcquisitionType::Digital)
        .await
        .unwrap();

    assert_eq!(first.catalog_entry_id, second.catalog_entry_id);
    assert_eq!(second.attach, AttachOutcome::AlreadyPresent);
    let rows = list_library(&conn, USER, None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item.status, LibraryItemStatus::Exploring);
}

#[tokio::test]
async fn add_unknown_game_is_not_found() {
    let conn = open_memory().unwrap();
    let err = add_to_library(
        &conn,
        &FakeCatalog::default(),
        USER,
        "999",
        LibraryItemStatus::Exploring,
        AcquisitionType::Digital,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ImportError::NotFound(_)));
    assert!(list_catalog_entries(&conn).unwrap().is_empty());
}

#[tokio::test]
async fn review_validates_input() {
    let conn = open_memory().unwrap();
    let catalog = catalog_knowing("1", "Portal");
    let outcome = add_to_library(&conn, &catalog, USER, "1", LibraryItemStatus::Completed, AcquisitionType::Digital)
        .await
        .unwrap();
    let AttachOutcome::Created(item_id) = outcome.attach else {
        panic!("expected a new item");
    };

    assert!(matches!(
        review_item(&conn, USER, item_id, Some(11), None),
        Err(ImportError::Validation(_))
    ));
    assert!(matches!(
        review_item(&conn, USER, item_id, Some(0), None),
        Err(ImportError::Validation(_))
    ));
    assert!(matches!(
        review_item(&conn, USER, item_id, None, Some("   ")),
        Err(ImportError::Validation(_))
    ));

    review_item(&conn, USER, item_id, Some(9), Some("Short and sharp.")).unwrap();
    let item = get_library_item(&conn, item_id).unwrap().unwrap();
    assert_eq!(item.rating, Some(9));
    assert_eq!(item.review.as_deref(), Some("Short and sharp."));

    // Another user's item is out of reach.
    assert!(matches!(
        review_item(&conn, "bob", item_id, Some(1), None),
        Err(ImportError::Db(_))
    ));
}

#[test]
fn ignore_title_trims_and_dedupes() {
    let conn = open_memory().unwrap();
    assert!(ignore_title(&conn, USER, "  Spacewar ").unwrap());
    assert!(!ignore_title(&conn, USER, "Spacewar").unwrap());
    assert!(matches!(ignore_title(&conn, USER, " "), Err(ImportError::Validation(_))));
    assert!(matches!(ignore_title(&conn, "", "Spacewar"), Err(ImportError::Unauthorized)));

    let ignored = list_ignored_candidates(&conn, USER).unwrap();
    assert_eq!(ignored.len(), 1);
    assert_eq!(ignored[0].title, "Spacewar");
}
