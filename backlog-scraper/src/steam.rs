//! Steam Web API client for owned-game listings.

use backlog_catalog::OwnedGame;

use crate::client::{build_http, send_json};
use crate::config::ServiceConfig;
use crate::credentials::Credentials;
use crate::error::CatalogError;
use crate::types::{SteamGame, SteamOwnedGamesResponse};
use crate::validate::validate_steam_id;

const SERVICE: &str = "Steam";
const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v1/";

/// HTTP client for the Steam Web API.
pub struct SteamClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl SteamClient {
    pub fn new(creds: &Credentials, config: &ServiceConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            http: build_http(config)?,
            api_url: config.steam_url.trim_end_matches('/').to_string(),
            api_key: creds.steam()?.to_string(),
        })
    }

    /// All games owned by a SteamID64, including free games that were played.
    pub async fn get_owned_games(&self, account: &str) -> Result<Vec<OwnedGame>, CatalogError> {
        let steam_id = validate_steam_id(account)?;

        let request = self
            .http
            .get(format!("{}{}", self.api_url, OWNED_GAMES_PATH))
            .query(&[
                ("key", self.api_key.as_str()),
                ("steamid", steam_id),
                ("include_appinfo", "1"),
                ("include_played_free_games", "1"),
                ("format", "json"),
            ]);

        let resp: SteamOwnedGamesResponse = send_json(SERVICE, request).await?;
        let games = owned_games(steam_id, resp)?;
        log::debug!("Steam account {} owns {} games", steam_id, games.len());
        Ok(games)
    }
}

/// Unpack a GetOwnedGames response.
fn owned_games(
    steam_id: &str,
    resp: SteamOwnedGamesResponse,
) -> Result<Vec<OwnedGame>, CatalogError> {
    let Some(games) = resp.response.games else {
        return match resp.response.game_count {
            Some(0) => Ok(Vec::new()),
            _ => Err(CatalogError::PrivateProfile(steam_id.to_string())),
        };
    };
    Ok(games.into_iter().filter_map(SteamGame::into_owned_game).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEAM_ID: &str = "76561197960287930";

    fn parse(json: &str) -> SteamOwnedGamesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn hidden_games_mean_private_profile() {
        let result = owned_games(STEAM_ID, parse(r#"{"response": {}}"#));
        assert!(matches!(result, Err(CatalogError::PrivateProfile(id)) if id == STEAM_ID));

        let result = owned_games(STEAM_ID, parse(r#"{"response": {"game_count": 12}}"#));
        assert!(matches!(result, Err(CatalogError::PrivateProfile(_))));
    }

    #[test]
    fn empty_library_is_not_an_error() {
        let games = owned_games(STEAM_ID, parse(r#"{"response": {"game_count": 0}}"#)).unwrap();
        assert!(games.is_empty());

        let games = owned_games(STEAM_ID, parse(r#"{"response": {"game_count": 0, "games": []}}"#)).unwrap();
        assert!(games.is_empty());
    }

    #[test]
    fn needs_api_key() {
        let result = SteamClient::new(&Credentials::default(), &ServiceConfig::default());
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }
}
