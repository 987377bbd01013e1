/// Errors surfaced by the external catalog clients.
///
/// An empty result is never an error: searches return an empty list and
/// lookups return `None`.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Malformed input, rejected before any request is made.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The service could not be reached, timed out, returned a server error,
    /// or sent a payload that did not decode.
    #[error("{service} is unavailable: {message}")]
    UpstreamUnavailable { service: &'static str, message: String },

    #[error("Rate limited by {service}")]
    RateLimited { service: &'static str },

    #[error("Invalid credentials for {service}: {message}")]
    InvalidCredentials { service: &'static str, message: String },

    #[error("Steam profile {0} is private; set game details to public to import")]
    PrivateProfile(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub(crate) fn unavailable(service: &'static str, message: impl std::fmt::Display) -> Self {
        Self::UpstreamUnavailable {
            service,
            message: message.to_string(),
        }
    }

    /// Whether the failure means the service could not answer right now.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::RateLimited { .. }
        )
    }
}
