use std::path::{Path, PathBuf};

use crate::error::CatalogError;

const IGDB_CLIENT_ID_VAR: &str = "IGDB_CLIENT_ID";
const IGDB_CLIENT_SECRET_VAR: &str = "IGDB_CLIENT_SECRET";
const STEAM_API_KEY_VAR: &str = "STEAM_API_KEY";

/// API credentials for the external catalog services.
///
/// Every field is optional at load time; a client only fails when the
/// credentials it needs are missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub igdb_client_id: Option<String>,
    pub igdb_client_secret: Option<String>,
    pub steam_api_key: Option<String>,
}

/// Where a credential field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each credential field.
#[derive(Debug)]
pub struct CredentialSources {
    pub igdb_client_id: CredentialSource,
    pub igdb_client_secret: CredentialSource,
    pub steam_api_key: CredentialSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    igdb: Option<IgdbSection>,
    steam: Option<SteamSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct IgdbSection {
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct SteamSection {
    api_key: Option<String>,
}

impl Credentials {
    /// Load credentials from environment variables, falling back to the config file.
    pub fn load() -> Self {
        let file = config_path().and_then(|p| read_config_file(&p));
        Self::resolve(file.as_ref(), |var| std::env::var(var).ok())
    }

    /// Load credentials from a specific config file, still honoring env vars.
    pub fn load_from(path: &Path) -> Self {
        let file = read_config_file(path);
        Self::resolve(file.as_ref(), |var| std::env::var(var).ok())
    }

    fn resolve(file: Option<&ConfigFile>, env: impl Fn(&str) -> Option<String>) -> Self {
        let igdb = file.and_then(|f| f.igdb.as_ref());
        let steam = file.and_then(|f| f.steam.as_ref());
        Self {
            igdb_client_id: env(IGDB_CLIENT_ID_VAR)
                .or_else(|| igdb.and_then(|s| s.client_id.clone())),
            igdb_client_secret: env(IGDB_CLIENT_SECRET_VAR)
                .or_else(|| igdb.and_then(|s| s.client_secret.clone())),
            steam_api_key: env(STEAM_API_KEY_VAR)
                .or_else(|| steam.and_then(|s| s.api_key.clone())),
        }
    }

    /// IGDB (Twitch) client id and secret.
    pub fn igdb(&self) -> Result<(&str, &str), CatalogError> {
        match (&self.igdb_client_id, &self.igdb_client_secret) {
            (Some(id), Some(secret)) => Ok((id.as_str(), secret.as_str())),
            _ => Err(CatalogError::Config(format!(
                "Missing IGDB credentials. Set {IGDB_CLIENT_ID_VAR} and {IGDB_CLIENT_SECRET_VAR} or add an [igdb] section to the config file"
            ))),
        }
    }

    /// Steam Web API key.
    pub fn steam(&self) -> Result<&str, CatalogError> {
        self.steam_api_key.as_deref().ok_or_else(|| {
            CatalogError::Config(format!(
                "Missing Steam API key. Set {STEAM_API_KEY_VAR} or add a [steam] section to the config file"
            ))
        })
    }

    /// Replace fields with explicit values (e.g., from CLI args).
    pub fn with_overrides(mut self, steam_api_key: Option<String>) -> Self {
        if let Some(key) = steam_api_key {
            self.steam_api_key = Some(key);
        }
        self
    }
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("backlog").join("credentials.toml"))
}

/// Save credentials to the default config file. Returns the path written.
pub fn save_to_file(creds: &Credentials) -> Result<PathBuf, CatalogError> {
    let path = config_path().ok_or_else(|| {
        CatalogError::Config("Could not determine config directory".to_string())
    })?;
    save_to_path(creds, &path)?;
    Ok(path)
}

/// Save credentials to `path`, creating parent directories as needed.
pub fn save_to_path(creds: &Credentials, path: &Path) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = ConfigFile {
        igdb: Some(IgdbSection {
            client_id: creds.igdb_client_id.clone(),
            client_secret: creds.igdb_client_secret.clone(),
        }),
        steam: Some(SteamSection {
            api_key: creds.steam_api_key.clone(),
        }),
    };

    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| CatalogError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Determine where each credential field is coming from.
pub fn credential_sources() -> CredentialSources {
    let file = config_path().and_then(|p| read_config_file(&p));
    let igdb = file.as_ref().and_then(|f| f.igdb.as_ref());
    let steam = file.as_ref().and_then(|f| f.steam.as_ref());

    let source = |var: &'static str, in_file: bool| {
        if std::env::var(var).is_ok() {
            CredentialSource::EnvVar(var)
        } else if in_file {
            CredentialSource::ConfigFile
        } else {
            CredentialSource::Missing
        }
    };

    CredentialSources {
        igdb_client_id: source(
            IGDB_CLIENT_ID_VAR,
            igdb.and_then(|s| s.client_id.as_ref()).is_some(),
        ),
        igdb_client_secret: source(
            IGDB_CLIENT_SECRET_VAR,
            igdb.and_then(|s| s.client_secret.as_ref()).is_some(),
        ),
        steam_api_key: source(
            STEAM_API_KEY_VAR,
            steam.and_then(|s| s.api_key.as_ref()).is_some(),
        ),
    }
}

fn read_config_file(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring unreadable credentials file {}: {}", path.display(), e);
            None
        }
    }
}
