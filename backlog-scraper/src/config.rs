//! Endpoint and timeout settings for the catalog clients.

use std::time::Duration;

pub const IGDB_API_URL: &str = "https://api.igdb.com/v4";
pub const TWITCH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const STEAM_API_URL: &str = "https://api.steampowered.com";
pub const HLTB_SEARCH_URL: &str = "https://howlongtobeat.com/api/search";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where each service lives and how long to wait for it.
///
/// Built once at startup and shared by reference; tests point the URLs at
/// unreachable addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub igdb_url: String,
    pub token_url: String,
    pub steam_url: String,
    pub hltb_url: String,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            igdb_url: IGDB_API_URL.to_string(),
            token_url: TWITCH_TOKEN_URL.to_string(),
            steam_url: STEAM_API_URL.to_string(),
            hltb_url: HLTB_SEARCH_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
