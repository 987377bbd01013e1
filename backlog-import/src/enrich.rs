//! Backfill completion times and cover art on library items.
//!
//! A bulk pass runs in three phases so the SQLite connection (which is not
//! `Send`) stays on the driving task:
//!
//! 1. **DB read:** select active items whose catalog entry is missing a field
//! 2. **Lookups:** query the external sources with bounded concurrency
//! 3. **DB write:** persist whatever each lookup resolved, as results arrive

use backlog_catalog::{CatalogEntry, LibraryItem, Matcher};
use backlog_db::operations::{self, OperationError};
use backlog_db::queries;
use backlog_scraper::{CatalogClient, CompletionTimeSource};
use futures::stream::{self, StreamExt};
use rusqlite::Connection;
use thiserror::Error;
use tokio::time::Duration;

use crate::owned_import::{ImportError, require_user};
use crate::progress::ImportProgress;

/// Lookups for one item (both fields) must finish within this.
pub const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(60);

/// Items looked up at once during a bulk pass.
pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Catalog entry {0} not found")]
    MissingEntry(i64),
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// A derived attribute the enricher can fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichField {
    CompletionTime,
    Artwork,
}

impl EnrichField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompletionTime => "completion time",
            Self::Artwork => "artwork",
        }
    }
}

/// What one backfill resolved.
///
/// A field is `None` when it was already set, when the source had no data,
/// or when its lookup failed (see `failures`).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnrichedFields {
    pub completion_hours: Option<f64>,
    pub cover_url: Option<String>,
    pub failures: Vec<(EnrichField, String)>,
}

impl EnrichedFields {
    pub fn is_empty(&self) -> bool {
        self.completion_hours.is_none() && self.cover_url.is_none()
    }
}

/// Options for a bulk enrichment pass.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Maximum items to process.
    pub limit: Option<u32>,
    pub concurrency: usize,
    pub item_timeout: Duration,
    /// Picks the search hit whose cover is used.
    pub matcher: Matcher,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            limit: None,
            concurrency: DEFAULT_CONCURRENCY,
            item_timeout: DEFAULT_ITEM_TIMEOUT,
            matcher: Matcher::default(),
        }
    }
}

/// Statistics from an enrichment pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichStats {
    pub processed: u64,
    pub completion_found: u64,
    pub artwork_found: u64,
    /// Items where every lookup came back empty without failing.
    pub nothing_found: u64,
    /// Failed or timed-out lookups.
    pub errors: u64,
}

/// Fill the missing fields of one library item's catalog entry.
///
/// Each missing field is looked up exactly once. A failed lookup is logged
/// and reported in the result; the other field still proceeds, and whatever
/// resolved is saved without overwriting existing values.
pub async fn backfill<C, T>(
    conn: &Connection,
    catalog: &C,
    completion: &T,
    item: &LibraryItem,
    matcher: &Matcher,
) -> Result<EnrichedFields, EnrichError>
where
    C: CatalogClient,
    T: CompletionTimeSource,
{
    let entry = queries::find_catalog_entry(conn, item.catalog_entry_id)?
        .ok_or(EnrichError::MissingEntry(item.catalog_entry_id))?;

    let fields = lookup_missing(catalog, completion, &entry, matcher).await;
    save(conn, entry.id, &fields)?;
    Ok(fields)
}

/// Run [`backfill`] over every active item of `user_id` with missing fields.
pub async fn enrich_library<C, T>(
    conn: &Connection,
    catalog: &C,
    completion: &T,
    user_id: &str,
    options: &EnrichOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<EnrichStats, EnrichError>
where
    C: CatalogClient,
    T: CompletionTimeSource,
{
    let user_id = require_user(user_id)?;
    let mut stats = EnrichStats::default();

    // ── Phase 1: DB Read ──────────────────────────────────────────────
    let items = queries::items_to_enrich(conn, user_id, options.limit)?;
    let mut entries = Vec::with_capacity(items.len());
    for item in &items {
        match queries::find_catalog_entry(conn, item.catalog_entry_id)? {
            Some(entry) => entries.push(entry),
            None => log::warn!("Library item {} has no catalog entry", item.id),
        }
    }

    let total = entries.len();
    if total == 0 {
        log::debug!("Nothing to enrich for {}", user_id);
        return Ok(stats);
    }
    if let Some(p) = progress {
        p.on_phase(&format!("Enriching {} games", total));
    }

    // ── Phase 2: Lookups ──────────────────────────────────────────────
    let matcher = &options.matcher;
    let item_timeout = options.item_timeout;
    let mut results = stream::iter(entries)
        .map(move |entry| async move {
            let outcome =
                tokio::time::timeout(item_timeout, lookup_missing(catalog, completion, &entry, matcher))
                    .await;
            (entry, outcome)
        })
        .buffer_unordered(options.concurrency.max(1));

    // ── Phase 3: DB Write ─────────────────────────────────────────────
    while let Some((entry, outcome)) = results.next().await {
        stats.processed += 1;

        match outcome {
            Ok(fields) => {
                save(conn, entry.id, &fields)?;
                stats.errors += fields.failures.len() as u64;
                if fields.completion_hours.is_some() {
                    stats.completion_found += 1;
                }
                if fields.cover_url.is_some() {
                    stats.artwork_found += 1;
                }
                if fields.is_empty() && fields.failures.is_empty() {
                    stats.nothing_found += 1;
                }
            }
            Err(_) => {
                log::warn!(
                    "Enriching '{}' timed out after {}s",
                    entry.title,
                    item_timeout.as_secs()
                );
                stats.errors += 1;
            }
        }

        if let Some(p) = progress {
            p.on_item(stats.processed as usize, total, &entry.title);
        }
    }

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Enriched {} games: {} completion times, {} covers",
            stats.processed, stats.completion_found, stats.artwork_found
        ));
    }

    Ok(stats)
}

/// Query each source once per missing field. Never fails: lookup errors are
/// logged and collected.
async fn lookup_missing<C, T>(
    catalog: &C,
    completion: &T,
    entry: &CatalogEntry,
    matcher: &Matcher,
) -> EnrichedFields
where
    C: CatalogClient,
    T: CompletionTimeSource,
{
    let mut fields = EnrichedFields::default();

    if entry.completion_hours.is_none() {
        match completion.completion_hours(&entry.title).await {
            Ok(hours) => fields.completion_hours = hours,
            Err(e) => {
                log::warn!("Completion time lookup for '{}' failed: {}", entry.title, e);
                fields.failures.push((EnrichField::CompletionTime, e.to_string()));
            }
        }
    }

    if entry.cover_url.is_none() {
        match catalog.search(&entry.title).await {
            Ok(results) => fields.cover_url = best_cover(matcher, &entry.title, results),
            Err(e) => {
                log::warn!("Artwork lookup for '{}' failed: {}", entry.title, e);
                fields.failures.push((EnrichField::Artwork, e.to_string()));
            }
        }
    }

    fields
}

/// Cover of the closest-titled search hit that has one.
fn best_cover(matcher: &Matcher, title: &str, results: Vec<CatalogEntry>) -> Option<String> {
    let mut with_cover: Vec<(String, String)> = results
        .into_iter()
        .filter_map(|e| e.cover_url.map(|url| (e.title, url)))
        .collect();
    let titles: Vec<&str> = with_cover.iter().map(|(t, _)| t.as_str()).collect();
    let index = matcher.best_match(title, &titles)?.index;
    Some(with_cover.swap_remove(index).1)
}

fn save(conn: &Connection, entry_id: i64, fields: &EnrichedFields) -> Result<(), EnrichError> {
    if fields.is_empty() {
        return Ok(());
    }
    operations::update_catalog_enrichment(
        conn,
        entry_id,
        fields.completion_hours,
        fields.cover_url.as_deref(),
    )?;
    Ok(())
}
