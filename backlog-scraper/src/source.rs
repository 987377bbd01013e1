//! The catalog interfaces the import pipeline is written against, and the
//! production implementation combining IGDB and Steam.

use backlog_catalog::{CatalogEntry, OwnedGame};

use crate::config::ServiceConfig;
use crate::credentials::Credentials;
use crate::error::CatalogError;
use crate::hltb::HltbClient;
use crate::igdb::IgdbClient;
use crate::steam::SteamClient;
use crate::validate::{validate_numeric_id, validate_query, validate_steam_id};

/// Search, lookup and owned-games listing against an external catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogClient {
    /// Games whose title matches `title`. Empty when nothing matches.
    async fn search(&self, title: &str) -> Result<Vec<CatalogEntry>, CatalogError>;

    /// One game by provider id, `None` if unknown.
    async fn get_by_id(&self, external_id: &str) -> Result<Option<CatalogEntry>, CatalogError>;

    /// The catalog game linked to a Steam app, `None` if there is no link.
    async fn get_by_steam_app_id(&self, app_id: &str) -> Result<Option<CatalogEntry>, CatalogError>;

    /// Every game owned by an external account.
    async fn get_owned_games(&self, account: &str) -> Result<Vec<OwnedGame>, CatalogError>;
}

/// Estimated time to finish a game.
#[allow(async_fn_in_trait)]
pub trait CompletionTimeSource {
    /// Main-story hours, `None` when the service has no figure.
    async fn completion_hours(&self, title: &str) -> Result<Option<f64>, CatalogError>;
}

impl CompletionTimeSource for HltbClient {
    async fn completion_hours(&self, title: &str) -> Result<Option<f64>, CatalogError> {
        HltbClient::completion_hours(self, title).await
    }
}

/// IGDB for search and lookup, Steam for owned games.
///
/// Either half may be absent when its credentials are not configured; calls
/// that need it fail with [`CatalogError::Config`] after input validation.
pub struct CatalogService {
    igdb: Option<IgdbClient>,
    steam: Option<SteamClient>,
    igdb_missing: Option<String>,
    steam_missing: Option<String>,
}

impl CatalogService {
    pub fn new(creds: &Credentials, config: &ServiceConfig) -> Self {
        let (igdb, igdb_missing) = split(IgdbClient::new(creds, config));
        let (steam, steam_missing) = split(SteamClient::new(creds, config));
        Self {
            igdb,
            steam,
            igdb_missing,
            steam_missing,
        }
    }

    fn igdb(&self) -> Result<&IgdbClient, CatalogError> {
        self.igdb.as_ref().ok_or_else(|| {
            CatalogError::Config(self.igdb_missing.clone().unwrap_or_default())
        })
    }

    fn steam(&self) -> Result<&SteamClient, CatalogError> {
        self.steam.as_ref().ok_or_else(|| {
            CatalogError::Config(self.steam_missing.clone().unwrap_or_default())
        })
    }
}

fn split<T>(result: Result<T, CatalogError>) -> (Option<T>, Option<String>) {
    match result {
        Ok(client) => (Some(client), None),
        Err(CatalogError::Config(msg)) => (None, Some(msg)),
        Err(e) => (None, Some(e.to_string())),
    }
}

impl CatalogClient for CatalogService {
    async fn search(&self, title: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        validate_query(title)?;
        self.igdb()?.search(title).await
    }

    async fn get_by_id(&self, external_id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        validate_numeric_id(external_id)?;
        self.igdb()?.get_by_id(external_id).await
    }

    async fn get_by_steam_app_id(&self, app_id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        validate_numeric_id(app_id)?;
        self.igdb()?.get_by_steam_app_id(app_id).await
    }

    async fn get_owned_games(&self, account: &str) -> Result<Vec<OwnedGame>, CatalogError> {
        validate_steam_id(account)?;
        self.steam()?.get_owned_games(account).await
    }
}

