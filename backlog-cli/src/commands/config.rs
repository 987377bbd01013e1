use std::path::Path;

use backlog_scraper::CredentialSource;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{AppContext, settings_path};

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        let head: String = s.chars().take(2).collect();
        format!("{}****", head)
    }
}

fn log_file_status(label: &str, path: Option<&Path>) {
    match path {
        Some(p) if p.exists() => {
            log::info!(
                "  {}: {} {}",
                label,
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  {}: {} {}",
                label,
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  {}: {}",
                label,
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
}

/// Show effective settings, credentials and where each credential came from.
pub(crate) fn run_config_show(ctx: &AppContext) -> Result<(), CliError> {
    let sources = backlog_scraper::credential_sources();
    let creds = &ctx.credentials;
    let settings = &ctx.settings;

    log::info!(
        "{}",
        "Backlog Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log_file_status("Settings file   ", settings_path().as_deref());
    log_file_status("Credentials file", backlog_scraper::config_path().as_deref());
    crate::log_blank();

    log::info!("  {} {}", "user_id:".if_supports_color(Stdout, |t| t.cyan()), settings.user_id);
    log::info!(
        "  {} {}",
        "steam_account:".if_supports_color(Stdout, |t| t.cyan()),
        settings.steam_account.as_deref().unwrap_or("not set"),
    );
    log::info!(
        "  {} {}",
        "database:".if_supports_color(Stdout, |t| t.cyan()),
        settings.database_path()?.display(),
    );
    log::info!(
        "  {} {}",
        "match_threshold:".if_supports_color(Stdout, |t| t.cyan()),
        settings.match_threshold,
    );
    log::info!(
        "  {} {}",
        "enrich_concurrency:".if_supports_color(Stdout, |t| t.cyan()),
        settings.enrich_concurrency,
    );
    crate::log_blank();

    let fields: [(&str, &CredentialSource, Option<&String>, bool); 3] = [
        ("igdb.client_id", &sources.igdb_client_id, creds.igdb_client_id.as_ref(), false),
        ("igdb.client_secret", &sources.igdb_client_secret, creds.igdb_client_secret.as_ref(), true),
        ("steam.api_key", &sources.steam_api_key, creds.steam_api_key.as_ref(), true),
    ];

    for (name, source, value, is_secret) in fields {
        let source_str = format!("({})", source);
        let shown = value.map(|v| if is_secret { mask_value(v) } else { v.clone() });
        match shown {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
    Ok(())
}

/// Print the settings and credentials file paths.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    for path in [settings_path(), backlog_scraper::config_path()] {
        match path {
            Some(p) => println!("{}", p.display()),
            None => return Err(CliError::config("Could not determine config directory")),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_secrets() {
        assert_eq!(mask_value("abcdef"), "ab****");
        assert_eq!(mask_value("ab"), "****");
        assert_eq!(mask_value(""), "****");
    }
}
