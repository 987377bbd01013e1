//! User settings (`settings.toml`) and the per-invocation context built from
//! them.

use std::path::{Path, PathBuf};

use backlog_catalog::{DEFAULT_THRESHOLD, Matcher};
use backlog_import::enrich::DEFAULT_CONCURRENCY;
use backlog_scraper::{Credentials, ServiceConfig};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Values read from `settings.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Owner of the library the commands act on.
    pub user_id: String,
    /// SteamID64 used by `import steam` when none is given.
    pub steam_account: Option<String>,
    pub db_path: Option<PathBuf>,
    /// Title distance below which two titles count as the same game.
    pub match_threshold: f64,
    pub enrich_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_id: "local".to_string(),
            steam_account: None,
            db_path: None,
            match_threshold: DEFAULT_THRESHOLD,
            enrich_concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Return the path to the settings file.
pub(crate) fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("backlog").join("settings.toml"))
}

impl Settings {
    /// Load settings from the default path, or defaults if there is no file.
    pub(crate) fn load() -> Result<Self, CliError> {
        match settings_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content).map_err(|e| {
            CliError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), CliError> {
        if !(self.match_threshold > 0.0 && self.match_threshold <= 1.0) {
            return Err(CliError::config(format!(
                "match_threshold must be in (0, 1], got {}",
                self.match_threshold
            )));
        }
        if self.enrich_concurrency == 0 {
            return Err(CliError::config("enrich_concurrency must be at least 1"));
        }
        if self.user_id.trim().is_empty() {
            return Err(CliError::config("user_id must not be empty"));
        }
        Ok(())
    }

    /// Apply command-line flags on top of the file values.
    pub(crate) fn with_overrides(mut self, db: Option<PathBuf>, user: Option<String>) -> Self {
        if let Some(db) = db {
            self.db_path = Some(db);
        }
        if let Some(user) = user {
            self.user_id = user;
        }
        self
    }

    pub(crate) fn matcher(&self) -> Matcher {
        Matcher::new(self.match_threshold)
    }

    /// Configured database path, else `<data dir>/backlog/library.db`.
    pub(crate) fn database_path(&self) -> Result<PathBuf, CliError> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|d| d.join("backlog").join("library.db"))
            .ok_or_else(|| CliError::config("Could not determine data directory"))
    }
}

/// Everything a command needs, resolved once at startup.
pub(crate) struct AppContext {
    pub settings: Settings,
    pub credentials: Credentials,
    pub services: ServiceConfig,
    pub quiet: bool,
}

impl AppContext {
    /// Open (creating if needed) the library database.
    pub(crate) fn connect(&self) -> Result<Connection, CliError> {
        let path = self.settings.database_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        log::debug!("Opening library database {}", path.display());
        Ok(backlog_db::open_database(&path)?)
    }

    pub(crate) fn user_id(&self) -> &str {
        &self.settings.user_id
    }
}
