//! Clients for the external game catalogs: IGDB (search and lookup),
//! Steam (owned games) and HowLongToBeat (completion times).
//!
//! Provider responses are decoded into typed schemas and converted to
//! [`backlog_catalog::CatalogEntry`] before they leave this crate.

mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod hltb;
pub mod igdb;
pub mod source;
pub mod steam;
pub mod types;
pub mod validate;

pub use config::ServiceConfig;
pub use credentials::{
    CredentialSource, CredentialSources, Credentials, config_path, credential_sources,
    save_to_file,
};
pub use error::CatalogError;
pub use hltb::HltbClient;
pub use igdb::IgdbClient;
pub use source::{CatalogClient, CatalogService, CompletionTimeSource};
pub use steam::SteamClient;
