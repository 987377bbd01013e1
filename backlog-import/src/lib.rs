//! The library import and enrichment pipeline.
//!
//! Pulls owned games from an external account into a user's library,
//! backfills completion times and artwork, and handles single-game adds
//! and journal entries.
//! All network access goes through the `backlog-scraper` traits, so tests
//! drive the pipeline with in-process fakes.

pub mod enrich;
pub mod journal;
pub mod library;
pub mod owned_import;
pub mod progress;

pub use enrich::{
    EnrichError, EnrichField, EnrichOptions, EnrichStats, EnrichedFields, backfill,
    enrich_library,
};
pub use journal::{JournalDraft, edit_journal_entry, remove_journal_entry, write_journal_entry};
pub use library::{AddOutcome, add_to_library, ignore_title, review_item};
pub use owned_import::{ImportError, ImportOptions, ImportStats, import_owned_games};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
