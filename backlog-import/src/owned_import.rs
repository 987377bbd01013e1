//! Import an external account's owned games into a user's library.
//!
//! Each owned game moves through four steps:
//!
//! 1. **Fetched** from the catalog client (the whole list, before any write)
//! 2. **Filtered** against the user's ignored titles and the non-game classifier
//! 3. **Resolved** to a catalog entry: same provider id, else the IGDB game
//!    linked to the Steam app, else the closest local title, else a new entry
//! 4. **Attached** to the library unless an active item already exists
//!
//! The run executes in a single transaction, so a failure leaves the
//! library untouched.

use std::collections::{HashMap, HashSet};

use backlog_catalog::{
    AcquisitionType, CatalogEntry, CatalogSource, ImportLog, LibraryItemStatus, Matcher, NewLibraryItem,
    OwnedGame, classify_title, minutes_to_hours, normalize_title,
};
use backlog_db::operations::{self, AttachOutcome, OperationError};
use backlog_db::queries;
use backlog_scraper::{CatalogClient, CatalogError};
use rusqlite::Connection;
use thiserror::Error;

use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("A signed-in user is required")]
    Unauthorized,
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Reject an empty user id.
pub(crate) fn require_user(user_id: &str) -> Result<&str, ImportError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(ImportError::Unauthorized);
    }
    Ok(user_id)
}

/// Options for an owned-games import.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Decides whether an owned title is the same game as a local entry.
    pub matcher: Matcher,
    /// Leave out demos, soundtracks, DLC, test builds and tools.
    pub skip_non_games: bool,
    /// Status for games never launched.
    pub unplayed_status: LibraryItemStatus,
    /// Status for games with recorded playtime.
    pub played_status: LibraryItemStatus,
    /// Ask the catalog which IGDB game a Steam app belongs to before
    /// falling back to title matching.
    pub link_steam_apps: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            matcher: Matcher::default(),
            skip_non_games: true,
            unplayed_status: LibraryItemStatus::Exploring,
            played_status: LibraryItemStatus::InProgress,
            link_steam_apps: true,
        }
    }
}

/// Counts from one import run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub fetched: u64,
    /// New library items created.
    pub imported: u64,
    pub skipped_ignored: u64,
    pub skipped_non_game: u64,
    /// Already in the library; left unchanged.
    pub already_present: u64,
    /// Resolved to a catalog entry that existed before this game.
    pub catalog_matched: u64,
    pub catalog_created: u64,
    /// Resolved through the catalog's Steam app link (also counted as
    /// matched or created).
    pub catalog_linked: u64,
}

impl ImportStats {
    /// Games not imported, for any reason.
    pub fn skipped(&self) -> u64 {
        self.skipped_ignored + self.skipped_non_game + self.already_present
    }
}

/// A local catalog entry as seen by the resolver.
struct LocalEntry {
    id: i64,
    source: CatalogSource,
    external_id: String,
    /// Provider identity of the owned game this entry was resolved for
    /// earlier in the run.
    claimed_by: Option<(CatalogSource, String)>,
}

/// Local catalog titles the matcher resolves against. Grows as the run
/// creates entries.
struct LocalCatalog {
    entries: Vec<LocalEntry>,
    titles: Vec<String>,
    by_id: HashMap<i64, usize>,
}

impl LocalCatalog {
    fn load(conn: &Connection) -> Result<Self, ImportError> {
        let mut local = Self {
            entries: Vec::new(),
            titles: Vec::new(),
            by_id: HashMap::new(),
        };
        for entry in queries::list_catalog_entries(conn)? {
            local.push(entry.id, &entry);
        }
        Ok(local)
    }

    fn push(&mut self, id: i64, entry: &CatalogEntry) {
        self.by_id.insert(id, self.entries.len());
        self.entries.push(LocalEntry {
            id,
            source: entry.source,
            external_id: entry.external_id.clone(),
            claimed_by: None,
        });
        self.titles.push(entry.title.clone());
    }

    /// Record that `game` resolved to entry `id`. The first claim sticks.
    fn claim(&mut self, id: i64, game: &CatalogEntry) {
        if let Some(&index) = self.by_id.get(&id) {
            self.entries[index]
                .claimed_by
                .get_or_insert_with(|| (game.source, game.external_id.clone()));
        }
    }

    /// Whether `game` may land on the entry at `index` by title alone.
    ///
    /// An entry carrying (or claimed by) another id from the game's own
    /// provider is a different product, however close the titles are.
    fn open_to(&self, index: usize, game: &CatalogEntry) -> bool {
        let other_product =
            |source: CatalogSource, external_id: &str| source == game.source && external_id != game.external_id;

        let entry = &self.entries[index];
        if other_product(entry.source, &entry.external_id) {
            return false;
        }
        match &entry.claimed_by {
            Some((source, external_id)) => !other_product(*source, external_id),
            None => true,
        }
    }

    /// Closest open entry under the matcher's threshold.
    fn closest(&self, matcher: &Matcher, game: &CatalogEntry) -> Option<i64> {
        let open: Vec<usize> = (0..self.entries.len())
            .filter(|&i| self.open_to(i, game))
            .collect();
        let titles: Vec<&str> = open.iter().map(|&i| self.titles[i].as_str()).collect();

        let hit = matcher.best_match(&game.title, &titles)?;
        log::debug!(
            "Matched '{}' to catalog entry '{}' ({:.3})",
            game.title,
            hit.candidate,
            hit.score
        );
        Some(self.entries[open[hit.index]].id)
    }
}

/// Per-run resolver state.
struct Resolver<'a, C> {
    client: &'a C,
    options: &'a ImportOptions,
    local: LocalCatalog,
    /// Cleared by the first failed link lookup; the rest of the run
    /// matches by title.
    link_lookups: bool,
}

/// Import every game owned by `account` into `user_id`'s library.
///
/// Fails with [`ImportError::Unauthorized`] for an empty user id, and with
/// the catalog error if the owned-games list cannot be fetched; in both
/// cases nothing is written.
pub async fn import_owned_games<C: CatalogClient>(
    conn: &Connection,
    client: &C,
    user_id: &str,
    account: &str,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let user_id = require_user(user_id)?;

    let games = client.get_owned_games(account).await?;
    let mut stats = ImportStats {
        fetched: games.len() as u64,
        ..Default::default()
    };

    if let Some(p) = progress {
        p.on_phase(&format!("Importing {} owned games", games.len()));
    }

    let tx = conn.unchecked_transaction()?;

    let ignored: HashSet<String> = queries::list_ignored_candidates(&tx, user_id)?
        .iter()
        .map(|c| normalize_title(&c.title))
        .collect();
    let mut resolver = Resolver {
        client,
        options,
        local: LocalCatalog::load(&tx)?,
        link_lookups: options.link_steam_apps,
    };
    let source = games
        .first()
        .map(|g| g.entry.source.as_str())
        .unwrap_or("steam");

    for (i, game) in games.iter().enumerate() {
        import_game(&tx, user_id, game, &ignored, &mut resolver, &mut stats).await?;

        if let Some(p) = progress {
            p.on_item(i + 1, games.len(), &game.entry.title);
        }
    }

    let log_entry = ImportLog {
        id: 0,
        user_id: user_id.to_string(),
        source: source.to_string(),
        account: account.trim().to_string(),
        imported_at: chrono::Utc::now().to_rfc3339(),
        games_fetched: stats.fetched as i64,
        games_imported: stats.imported as i64,
        games_skipped: stats.skipped() as i64,
        catalog_created: stats.catalog_created as i64,
    };
    operations::insert_import_log(&tx, &log_entry)?;

    tx.commit()?;

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Imported {}, skipped {} of {} owned games",
            stats.imported,
            stats.skipped(),
            stats.fetched
        ));
    }

    Ok(stats)
}

async fn import_game<C: CatalogClient>(
    conn: &Connection,
    user_id: &str,
    game: &OwnedGame,
    ignored: &HashSet<String>,
    resolver: &mut Resolver<'_, C>,
    stats: &mut ImportStats,
) -> Result<(), ImportError> {
    let title = game.entry.title.as_str();
    let options = resolver.options;

    if ignored.contains(&normalize_title(title)) {
        log::debug!("Skipping ignored title '{}'", title);
        stats.skipped_ignored += 1;
        return Ok(());
    }
    if options.skip_non_games {
        let kind = classify_title(title);
        if !kind.is_game() {
            log::debug!("Skipping '{}' ({})", title, kind.as_str());
            stats.skipped_non_game += 1;
            return Ok(());
        }
    }

    let entry_id = resolver.resolve(conn, &game.entry, stats).await?;

    let status = if game.playtime_minutes > 0 {
        options.played_status
    } else {
        options.unplayed_status
    };
    let item = NewLibraryItem {
        user_id: user_id.to_string(),
        catalog_entry_id: entry_id,
        status,
        acquisition_type: AcquisitionType::Digital,
        platform: game.entry.platform.clone(),
        playtime_hours: (game.playtime_minutes > 0).then(|| minutes_to_hours(game.playtime_minutes)),
    };

    match operations::attach_library_item(conn, &item)? {
        AttachOutcome::Created(_) => stats.imported += 1,
        AttachOutcome::AlreadyPresent => {
            log::debug!("'{}' is already in the library", title);
            stats.already_present += 1;
        }
    }
    Ok(())
}

impl<C: CatalogClient> Resolver<'_, C> {
    /// Find or create the catalog entry an owned game belongs to.
    async fn resolve(
        &mut self,
        conn: &Connection,
        game: &CatalogEntry,
        stats: &mut ImportStats,
    ) -> Result<i64, ImportError> {
        let id = self.find_or_create(conn, game, stats).await?;
        self.local.claim(id, game);
        Ok(id)
    }

    async fn find_or_create(
        &mut self,
        conn: &Connection,
        game: &CatalogEntry,
        stats: &mut ImportStats,
    ) -> Result<i64, ImportError> {
        if let Some(existing) =
            queries::find_catalog_entry_by_external(conn, game.source, &game.external_id)?
        {
            stats.catalog_matched += 1;
            return Ok(existing.id);
        }

        if let Some(linked) = self.linked_entry(game).await {
            stats.catalog_linked += 1;
            if let Some(existing) =
                queries::find_catalog_entry_by_external(conn, linked.source, &linked.external_id)?
            {
                log::debug!("Steam app {} is IGDB game '{}'", game.external_id, existing.title);
                stats.catalog_matched += 1;
                return Ok(existing.id);
            }
            return self.create(conn, &linked, stats);
        }

        if let Some(id) = self.local.closest(&self.options.matcher, game) {
            stats.catalog_matched += 1;
            return Ok(id);
        }

        self.create(conn, game, stats)
    }

    /// The IGDB entry linked to a Steam app, when lookups are on and the
    /// catalog knows the link.
    async fn linked_entry(&mut self, game: &CatalogEntry) -> Option<CatalogEntry> {
        if game.source != CatalogSource::Steam || !self.link_lookups {
            return None;
        }
        match self.client.get_by_steam_app_id(&game.external_id).await {
            Ok(linked) => linked,
            Err(CatalogError::Validation(msg)) => {
                log::debug!("No IGDB link lookup for '{}': {}", game.title, msg);
                None
            }
            Err(e) => {
                match e {
                    CatalogError::Config(_) => log::debug!("IGDB link lookups disabled: {}", e),
                    _ => log::warn!("IGDB link lookup failed, matching by title instead: {}", e),
                }
                self.link_lookups = false;
                None
            }
        }
    }

    fn create(
        &mut self,
        conn: &Connection,
        entry: &CatalogEntry,
        stats: &mut ImportStats,
    ) -> Result<i64, ImportError> {
        let id = operations::upsert_catalog_entry(conn, entry)?;
        self.local.push(id, entry);
        stats.catalog_created += 1;
        Ok(id)
    }
}
