//! Single-game library actions: add by catalog id, review, and ignore.

use backlog_catalog::{AcquisitionType, LibraryItemStatus, NewLibraryItem};
use backlog_db::operations::{self, AttachOutcome};
use backlog_scraper::CatalogClient;
use rusqlite::Connection;

use crate::owned_import::{ImportError, require_user};

/// Result of [`add_to_library`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub catalog_entry_id: i64,
    pub title: String,
    pub attach: AttachOutcome,
}

/// Fetch a game by catalog id, store it, and attach it to the user's library.
///
/// Adding a game that is already in the library is not an error; the
/// outcome reports [`AttachOutcome::AlreadyPresent`].
pub async fn add_to_library<C: CatalogClient>(
    conn: &Connection,
    client: &C,
    user_id: &str,
    external_id: &str,
    status: LibraryItemStatus,
    acquisition_type: AcquisitionType,
) -> Result<AddOutcome, ImportError> {
    let user_id = require_user(user_id)?;

    let entry = client
        .get_by_id(external_id)
        .await?
        .ok_or_else(|| ImportError::NotFound(format!("Game {}", external_id.trim())))?;

    let catalog_entry_id = operations::upsert_catalog_entry(conn, &entry)?;
    let attach = operations::attach_library_item(
        conn,
        &NewLibraryItem {
            user_id: user_id.to_string(),
            catalog_entry_id,
            status,
            acquisition_type,
            platform: entry.platform.clone(),
            playtime_hours: None,
        },
    )?;

    Ok(AddOutcome {
        catalog_entry_id,
        title: entry.title,
        attach,
    })
}

/// Set a rating (1-10) and/or review text on one of the user's items.
pub fn review_item(
    conn: &Connection,
    user_id: &str,
    item_id: i64,
    rating: Option<u8>,
    review: Option<&str>,
) -> Result<(), ImportError> {
    let user_id = require_user(user_id)?;
    if let Some(r) = rating {
        if !(1..=10).contains(&r) {
            return Err(ImportError::Validation(format!(
                "rating must be between 1 and 10, got {r}"
            )));
        }
    }
    let review = review.map(str::trim).filter(|r| !r.is_empty());
    if rating.is_none() && review.is_none() {
        return Err(ImportError::Validation(
            "nothing to update: give a rating or a review".to_string(),
        ));
    }
    operations::update_library_review(conn, user_id, item_id, rating, review)?;
    Ok(())
}

/// Exclude a title from future imports. Returns false if it was already ignored.
pub fn ignore_title(conn: &Connection, user_id: &str, title: &str) -> Result<bool, ImportError> {
    let user_id = require_user(user_id)?;
    let title = title.trim();
    if title.is_empty() {
        return Err(ImportError::Validation("title must not be empty".to_string()));
    }
    Ok(operations::add_ignored_candidate(conn, user_id, title)?)
}
