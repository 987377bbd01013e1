//! Response schemas for the external services, and their conversion into
//! [`CatalogEntry`] values. Nothing provider-shaped leaves this crate.

use backlog_catalog::{CatalogEntry, CatalogSource, OwnedGame};
use serde::Deserialize;

/// Platform label for Steam library entries.
pub const STEAM_PLATFORM: &str = "PC (Microsoft Windows)";

// ── Twitch / IGDB ───────────────────────────────────────────────────────────

/// OAuth2 client-credentials token from Twitch.
#[derive(Debug, Deserialize)]
pub struct TwitchToken {
    pub access_token: String,
    /// Seconds until expiry.
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// A game record from IGDB's `/games` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IgdbGame {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub cover: Option<IgdbImage>,
    #[serde(default)]
    pub platforms: Vec<IgdbNamed>,
    /// Unix timestamp.
    #[serde(default)]
    pub first_release_date: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IgdbImage {
    pub image_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IgdbNamed {
    pub name: String,
}

impl IgdbImage {
    pub fn cover_url(&self) -> String {
        format!(
            "https://images.igdb.com/igdb/image/upload/t_cover_big/{}.jpg",
            self.image_id
        )
    }
}

impl From<IgdbGame> for CatalogEntry {
    fn from(game: IgdbGame) -> Self {
        let mut entry = CatalogEntry::new(CatalogSource::Igdb, game.id.to_string(), game.name);
        entry.cover_url = game.cover.as_ref().map(IgdbImage::cover_url);
        entry.platform = game.platforms.into_iter().next().map(|p| p.name);
        entry
    }
}

// ── Steam ───────────────────────────────────────────────────────────────────

/// Envelope of `IPlayerService/GetOwnedGames/v1`.
#[derive(Debug, Deserialize)]
pub struct SteamOwnedGamesResponse {
    pub response: SteamOwnedGames,
}

/// Steam omits `games` entirely when the profile's game details are private.
#[derive(Debug, Deserialize)]
pub struct SteamOwnedGames {
    #[serde(default)]
    pub game_count: Option<u32>,
    #[serde(default)]
    pub games: Option<Vec<SteamGame>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SteamGame {
    pub appid: u64,
    /// Only present with `include_appinfo=1`.
    #[serde(default)]
    pub name: Option<String>,
    /// Minutes.
    #[serde(default)]
    pub playtime_forever: u64,
    #[serde(default)]
    pub rtime_last_played: Option<i64>,
}

impl SteamGame {
    /// Library artwork on the Steam CDN.
    pub fn cover_url(&self) -> String {
        format!(
            "https://steamcdn-a.akamaihd.net/steam/apps/{}/library_600x900.jpg",
            self.appid
        )
    }

    /// Convert to an owned game; `None` for nameless (appinfo-less) rows.
    pub fn into_owned_game(self) -> Option<OwnedGame> {
        let name = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?.to_string();
        let mut entry = CatalogEntry::new(CatalogSource::Steam, self.appid.to_string(), name);
        entry.platform = Some(STEAM_PLATFORM.to_string());
        entry.cover_url = Some(self.cover_url());
        Some(OwnedGame {
            entry,
            playtime_minutes: self.playtime_forever,
            last_played: self.rtime_last_played.filter(|t| *t > 0),
        })
    }
}

// ── HowLongToBeat ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HltbSearchResponse {
    #[serde(default)]
    pub data: Vec<HltbGame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HltbGame {
    pub game_id: u64,
    pub game_name: String,
    /// Main story, in seconds. 0 when nobody has submitted a time.
    #[serde(default)]
    pub comp_main: u64,
}
