//! Shared HTTP plumbing: client construction and response classification.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::ServiceConfig;
use crate::error::CatalogError;

const USER_AGENT: &str = concat!("backlog/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by one service.
pub(crate) fn build_http(config: &ServiceConfig) -> Result<reqwest::Client, CatalogError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| CatalogError::Config(format!("Failed to build HTTP client: {e}")))
}

/// Map a non-success status to the matching error, `None` for 2xx.
pub(crate) fn classify_status(service: &'static str, status: StatusCode) -> Option<CatalogError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CatalogError::InvalidCredentials {
            service,
            message: format!("HTTP {status}"),
        },
        StatusCode::TOO_MANY_REQUESTS => CatalogError::RateLimited { service },
        _ => CatalogError::unavailable(service, format!("HTTP {status}")),
    })
}

/// Send a request and decode its JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, CatalogError> {
    let resp = request.send().await.map_err(|e| transport_error(service, e))?;

    let status = resp.status();
    if let Some(err) = classify_status(service, status) {
        log::debug!("{service} answered {status}");
        return Err(err);
    }

    let text = resp.text().await.map_err(|e| transport_error(service, e))?;
    serde_json::from_str(&text).map_err(|e| {
        CatalogError::unavailable(
            service,
            format!(
                "unexpected response: {e}. Response: {}",
                snippet(&text)
            ),
        )
    })
}

/// First 200 characters of a body, for error messages.
fn snippet(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn transport_error(service: &'static str, e: reqwest::Error) -> CatalogError {
    if e.is_timeout() {
        CatalogError::unavailable(service, "request timed out")
    } else {
        CatalogError::unavailable(service, e)
    }
}
