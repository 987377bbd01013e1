use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Opening or migrating the library database failed
    #[error("Database error: {0}")]
    Schema(#[from] backlog_db::SchemaError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] backlog_db::OperationError),

    /// External catalog request failed
    #[error("{0}")]
    Catalog(#[from] backlog_scraper::CatalogError),

    /// Import or library action failed
    #[error("{0}")]
    Import(#[from] backlog_import::ImportError),

    /// Enrichment pass failed
    #[error("{0}")]
    Enrich(#[from] backlog_import::EnrichError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
