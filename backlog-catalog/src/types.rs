//! Data model types for the game library.
//!
//! These types represent the persistent library schema: catalog entries,
//! per-user library items, journal entries, ignored import candidates, and
//! import tracking.

use serde::{Deserialize, Serialize};

// ── Catalog Entry ───────────────────────────────────────────────────────────

/// Where a catalog entry's external identifier comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Igdb,
    Steam,
    Manual,
}

impl CatalogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Igdb => "igdb",
            Self::Steam => "steam",
            Self::Manual => "manual",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "igdb" => Self::Igdb,
            "steam" => Self::Steam,
            _ => Self::Manual,
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A game as known to an external metadata provider, normalized.
///
/// `id` is the local row id once persisted, 0 for entries fresh from a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub id: i64,
    pub source: CatalogSource,
    pub external_id: String,
    pub title: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    /// Estimated hours to finish the main story.
    #[serde(default)]
    pub completion_hours: Option<f64>,
}

impl CatalogEntry {
    /// Build an unsaved entry with only the identifying fields set.
    pub fn new(source: CatalogSource, external_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            source,
            external_id: external_id.into(),
            title: title.into(),
            platform: None,
            cover_url: None,
            completion_hours: None,
        }
    }

    /// Whether any field the enricher can backfill is still missing.
    pub fn needs_enrichment(&self) -> bool {
        self.completion_hours.is_none() || self.cover_url.is_none()
    }
}

/// A catalog entry from an account's owned-games listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedGame {
    pub entry: CatalogEntry,
    /// Total playtime as reported by the provider, in minutes.
    pub playtime_minutes: u64,
    /// Unix timestamp of the last session, if the provider reports one.
    #[serde(default)]
    pub last_played: Option<i64>,
}

// ── Library Item ────────────────────────────────────────────────────────────

/// Where a game sits in the user's backlog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryItemStatus {
    #[default]
    Exploring,
    InProgress,
    Completed,
    Abandoned,
    Wishlist,
    Revisiting,
}

impl LibraryItemStatus {
    pub const ALL: [LibraryItemStatus; 6] = [
        Self::Exploring,
        Self::InProgress,
        Self::Completed,
        Self::Abandoned,
        Self::Wishlist,
        Self::Revisiting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exploring => "exploring",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
            Self::Wishlist => "wishlist",
            Self::Revisiting => "revisiting",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Exploring => "Exploring",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Abandoned => "Abandoned",
            Self::Wishlist => "Wishlist",
            Self::Revisiting => "Revisiting",
        }
    }

    /// Statuses that count as still to be played.
    pub fn is_backlog(&self) -> bool {
        matches!(self, Self::Exploring | Self::InProgress | Self::Revisiting)
    }
}

impl std::fmt::Display for LibraryItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LibraryItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "exploring" => Ok(Self::Exploring),
            "in_progress" | "playing" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            "abandoned" | "dropped" => Ok(Self::Abandoned),
            "wishlist" => Ok(Self::Wishlist),
            "revisiting" => Ok(Self::Revisiting),
            _ => Err(format!("unknown status '{s}'")),
        }
    }
}

/// How the user obtained the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionType {
    #[default]
    Digital,
    Physical,
    Subscription,
}

impl AcquisitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Digital => "digital",
            Self::Physical => "physical",
            Self::Subscription => "subscription",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "physical" => Self::Physical,
            "subscription" => Self::Subscription,
            _ => Self::Digital,
        }
    }
}

/// A user's record of owning or tracking a specific game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryItem {
    pub id: i64,
    pub user_id: String,
    pub catalog_entry_id: i64,
    pub status: LibraryItemStatus,
    pub acquisition_type: AcquisitionType,
    pub platform: Option<String>,
    pub playtime_hours: Option<f64>,
    /// 1-10.
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl LibraryItem {
    /// Soft-deleted items keep their row but are excluded everywhere.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Fields needed to attach a game to a user's library.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLibraryItem {
    pub user_id: String,
    pub catalog_entry_id: i64,
    pub status: LibraryItemStatus,
    pub acquisition_type: AcquisitionType,
    pub platform: Option<String>,
    pub playtime_hours: Option<f64>,
}

// ── Journal ─────────────────────────────────────────────────────────────────

/// How a play session felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMood {
    Excited,
    Relaxed,
    Frustrated,
    Accomplished,
    Curious,
    Nostalgic,
}

impl JournalMood {
    pub const ALL: [JournalMood; 6] = [
        Self::Excited,
        Self::Relaxed,
        Self::Frustrated,
        Self::Accomplished,
        Self::Curious,
        Self::Nostalgic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excited => "excited",
            Self::Relaxed => "relaxed",
            Self::Frustrated => "frustrated",
            Self::Accomplished => "accomplished",
            Self::Curious => "curious",
            Self::Nostalgic => "nostalgic",
        }
    }
}

impl std::fmt::Display for JournalMood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JournalMood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == key)
            .ok_or_else(|| format!("unknown mood '{s}'"))
    }
}

/// Who may read a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalVisibility {
    #[default]
    Private,
    FriendsOnly,
    Public,
}

impl JournalVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::FriendsOnly => "friends_only",
            Self::Public => "public",
        }
    }
}

impl std::fmt::Display for JournalVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JournalVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "private" => Ok(Self::Private),
            "friends_only" | "friends" => Ok(Self::FriendsOnly),
            "public" => Ok(Self::Public),
            _ => Err(format!("unknown visibility '{s}'")),
        }
    }
}

/// A note a user wrote about a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub id: i64,
    pub user_id: String,
    pub catalog_entry_id: i64,
    /// The library item the note was written from, if any.
    pub library_item_id: Option<i64>,
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<JournalMood>,
    /// Which play session the note is about, counting from 1.
    pub play_session: Option<u32>,
    pub visibility: JournalVisibility,
    /// Set the first time the entry is made public, cleared when it goes private.
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields needed to write a journal entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewJournalEntry {
    pub user_id: String,
    pub catalog_entry_id: i64,
    pub library_item_id: Option<i64>,
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<JournalMood>,
    pub play_session: Option<u32>,
    pub visibility: JournalVisibility,
}

/// Changes to a journal entry. `None` leaves the field as it is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JournalUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<JournalMood>,
    pub play_session: Option<u32>,
    pub visibility: Option<JournalVisibility>,
}

impl JournalUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Ignored Import Candidates ───────────────────────────────────────────────

/// A title the user dismissed so bulk imports skip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredImportCandidate {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub created_at: String,
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for a bulk import run.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub user_id: String,
    pub source: String,
    pub account: String,
    pub imported_at: String,
    pub games_fetched: i64,
    pub games_imported: i64,
    pub games_skipped: i64,
    pub catalog_created: i64,
}
