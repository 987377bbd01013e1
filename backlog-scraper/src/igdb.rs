//! IGDB client: title search, lookup by id, and lookup by Steam app id.
//!
//! Requests carry a Twitch app token obtained with the client-credentials
//! grant. The token is cached in the client and refreshed shortly before it
//! expires.

use std::sync::Arc;

use backlog_catalog::CatalogEntry;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::client::{build_http, send_json};
use crate::config::ServiceConfig;
use crate::credentials::Credentials;
use crate::error::CatalogError;
use crate::types::{IgdbGame, TwitchToken};
use crate::validate::{validate_numeric_id, validate_query};

const SERVICE: &str = "IGDB";
const TOKEN_SERVICE: &str = "Twitch";

/// Refresh this long before the token actually expires.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

const GAME_FIELDS: &str = "name,cover.image_id,platforms.name,first_release_date";
const SEARCH_LIMIT: u32 = 50;

/// IGDB `external_games.category` value for Steam.
const STEAM_CATEGORY: u32 = 1;

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

/// HTTP client for the IGDB v4 API.
pub struct IgdbClient {
    http: reqwest::Client,
    api_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl IgdbClient {
    pub fn new(creds: &Credentials, config: &ServiceConfig) -> Result<Self, CatalogError> {
        let (client_id, client_secret) = creds.igdb()?;
        Ok(Self {
            http: build_http(config)?,
            api_url: config.igdb_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token: Arc::new(Mutex::new(None)),
        })
    }

    /// Search games by title.
    pub async fn search(&self, title: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let title = validate_query(title)?;
        let games = self.query_games(search_body(title)).await?;
        log::debug!("IGDB search '{}' returned {} games", title, games.len());
        Ok(games.into_iter().map(CatalogEntry::from).collect())
    }

    /// Fetch one game by IGDB id. `Ok(None)` if IGDB has no such game.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        let id = validate_numeric_id(id)?;
        let games = self.query_games(lookup_body(id)).await?;
        Ok(games.into_iter().next().map(CatalogEntry::from))
    }

    /// Fetch the IGDB game linked to a Steam app. `Ok(None)` if IGDB has no
    /// link for that app.
    pub async fn get_by_steam_app_id(&self, app_id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        let app_id = validate_numeric_id(app_id)?;
        let games = self.query_games(steam_app_body(app_id)).await?;
        log::debug!("IGDB steam app {} linked to {} games", app_id, games.len());
        Ok(games.into_iter().next().map(CatalogEntry::from))
    }

    async fn query_games(&self, body: String) -> Result<Vec<IgdbGame>, CatalogError> {
        let token = self.access_token().await?;
        let request = self
            .http
            .post(format!("{}/games", self.api_url))
            .header("Client-ID", &self.client_id)
            .header("Accept", "application/json")
            .bearer_auth(token)
            .body(body);

        match send_json(SERVICE, request).await {
            Err(CatalogError::InvalidCredentials { .. }) => {
                // A revoked token looks the same as bad credentials; drop it so
                // the next call fetches a fresh one.
                *self.token.lock().await = None;
                Err(CatalogError::InvalidCredentials {
                    service: SERVICE,
                    message: "token rejected".to_string(),
                })
            }
            other => other,
        }
    }

    /// Return a valid access token, fetching a new one if needed.
    async fn access_token(&self) -> Result<String, CatalogError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.access_token.clone());
            }
        }

        log::debug!("Requesting new Twitch app token");
        let request = self.http.post(&self.token_url).query(&[
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ]);
        let token: TwitchToken = send_json(TOKEN_SERVICE, request).await?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        let access_token = token.access_token;
        *cached = Some(CachedToken {
            access_token: access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(access_token)
    }
}

/// Apicalypse body for a title search.
fn search_body(title: &str) -> String {
    format!(
        "fields {GAME_FIELDS}; search \"{}\"; limit {SEARCH_LIMIT};",
        escape(title)
    )
}

/// Apicalypse body for a single-id lookup.
fn lookup_body(id: u64) -> String {
    format!("fields {GAME_FIELDS}; where id = {id};")
}

/// Apicalypse body resolving a Steam app id through IGDB's external links.
fn steam_app_body(app_id: u64) -> String {
    format!(
        "fields {GAME_FIELDS}; where external_games.category = {STEAM_CATEGORY} & external_games.uid = \"{app_id}\"; limit 1;"
    )
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_body_quotes_title() {
        assert_eq!(
            search_body("Hades"),
            "fields name,cover.image_id,platforms.name,first_release_date; search \"Hades\"; limit 50;"
        );
        assert!(search_body(r#"The "Best" Game"#).contains(r#"search "The \"Best\" Game";"#));
    }

    #[test]
    fn lookup_body_filters_id() {
        assert!(lookup_body(113112).ends_with("where id = 113112;"));
    }

    #[test]
    fn steam_app_body_filters_external_link() {
        assert_eq!(
            steam_app_body(292030),
            "fields name,cover.image_id,platforms.name,first_release_date; \
             where external_games.category = 1 & external_games.uid = \"292030\"; limit 1;"
        );
    }

    #[test]
    fn missing_credentials() {
        let result = IgdbClient::new(&Credentials::default(), &ServiceConfig::default());
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }
}
