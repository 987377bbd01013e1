#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use backlog_catalog::{CatalogEntry, CatalogSource, OwnedGame};
use backlog_scraper::{CatalogClient, CatalogError, CompletionTimeSource};

pub const STEAM_ID: &str = "76561197960287930";

pub fn steam_game(appid: u64, title: &str, playtime_minutes: u64) -> OwnedGame {
    let mut entry = CatalogEntry::new(CatalogSource::Steam, appid.to_string(), title);
    entry.platform = Some("PC (Microsoft Windows)".to_string());
    OwnedGame {
        entry,
        playtime_minutes,
        last_played: None,
    }
}

pub fn igdb_entry(id: u64, title: &str, cover: Option<&str>) -> CatalogEntry {
    let mut entry = CatalogEntry::new(CatalogSource::Igdb, id.to_string(), title);
    entry.cover_url = cover.map(str::to_string);
    entry
}

/// In-memory catalog with call counting.
#[derive(Default)]
pub struct FakeCatalog {
    pub owned: Vec<OwnedGame>,
    pub owned_unavailable: bool,
    pub search_results: HashMap<String, Vec<CatalogEntry>>,
    pub search_unavailable: bool,
    pub by_id: HashMap<String, CatalogEntry>,
    /// IGDB games keyed by the Steam app id they are linked to.
    pub steam_links: HashMap<String, CatalogEntry>,
    pub links_unavailable: bool,
    pub owned_calls: Cell<u32>,
    pub search_calls: RefCell<Vec<String>>,
    pub link_calls: RefCell<Vec<String>>,
}

impl FakeCatalog {
    pub fn owning(games: Vec<OwnedGame>) -> Self {
        Self {
            owned: games,
            ..Default::default()
        }
    }

    pub fn linking(mut self, app_id: u64, entry: CatalogEntry) -> Self {
        self.steam_links.insert(app_id.to_string(), entry);
        self
    }
}

impl CatalogClient for FakeCatalog {
    async fn search(&self, title: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.search_calls.borrow_mut().push(title.to_string());
        if self.search_unavailable {
            return Err(CatalogError::UpstreamUnavailable {
                service: "IGDB",
                message: "HTTP 503 Service Unavailable".to_string(),
            });
        }
        Ok(self.search_results.get(title).cloned().unwrap_or_default())
    }

    async fn get_by_id(&self, external_id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        Ok(self.by_id.get(external_id).cloned())
    }

    async fn get_by_steam_app_id(&self, app_id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        self.link_calls.borrow_mut().push(app_id.to_string());
        if self.links_unavailable {
            return Err(CatalogError::UpstreamUnavailable {
                service: "IGDB",
                message: "connection reset".to_string(),
            });
        }
        Ok(self.steam_links.get(app_id).cloned())
    }

    async fn get_owned_games(&self, _account: &str) -> Result<Vec<OwnedGame>, CatalogError> {
        self.owned_calls.set(self.owned_calls.get() + 1);
        if self.owned_unavailable {
            return Err(CatalogError::UpstreamUnavailable {
                service: "Steam",
                message: "request timed out".to_string(),
            });
        }
        Ok(self.owned.clone())
    }
}

/// Completion-time source answering from a fixed table.
#[derive(Default)]
pub struct FakeCompletion {
    pub hours: HashMap<String, f64>,
    pub unavailable: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeCompletion {
    pub fn with(entries: &[(&str, f64)]) -> Self {
        Self {
            hours: entries.iter().map(|(t, h)| (t.to_string(), *h)).collect(),
            ..Default::default()
        }
    }
}

impl CompletionTimeSource for FakeCompletion {
    async fn completion_hours(&self, title: &str) -> Result<Option<f64>, CatalogError> {
        self.calls.borrow_mut().push(title.to_string());
        if self.unavailable {
            return Err(CatalogError::RateLimited {
                service: "HowLongToBeat",
            });
        }
        Ok(self.hours.get(title).copied())
    }
}
