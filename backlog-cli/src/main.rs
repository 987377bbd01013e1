//! backlog CLI
//!
//! Command-line interface for importing owned games into a backlog,
//! matching them against a catalog, and filling in completion times.

mod cli_types;
mod commands;
mod error;
mod progress;
mod settings;

use std::io::Write;

use backlog_scraper::{Credentials, ServiceConfig};
use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use backlog_catalog::JournalUpdate;
use cli_types::{
    Cli, Commands, ConfigAction, IgnoreAction, ImportSource, JournalAction, LibraryAction,
};
pub(crate) use error::CliError;
use settings::{AppContext, Settings};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load()?.with_overrides(cli.db, cli.user);
    let ctx = AppContext {
        settings,
        credentials: Credentials::load(),
        services: ServiceConfig::default(),
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Search { query, json, local } => {
            commands::search::run_search(&ctx, &query, json, local).await
        }
        Commands::Add {
            igdb_id,
            status,
            acquisition,
        } => commands::add::run_add(&ctx, &igdb_id, status, &acquisition).await,
        Commands::Import { source } => match source {
            ImportSource::Steam {
                steam_id,
                include_non_games,
                no_igdb_links,
                api_key,
            } => {
                commands::import::run_import_steam(
                    &ctx,
                    steam_id,
                    include_non_games,
                    !no_igdb_links,
                    api_key,
                )
                .await
            }
        },
        Commands::Enrich { limit, concurrency } => {
            commands::enrich::run_enrich(&ctx, limit, concurrency).await
        }
        Commands::Library { action } => match action {
            LibraryAction::List { status, json } => {
                commands::library::run_library_list(&ctx, status, json)
            }
            LibraryAction::Status { item_id, status } => {
                commands::library::run_library_status(&ctx, item_id, status)
            }
            LibraryAction::Review {
                item_id,
                rating,
                text,
            } => commands::library::run_library_review(&ctx, item_id, rating, text.as_deref()),
            LibraryAction::Remove { item_id } => {
                commands::library::run_library_remove(&ctx, item_id)
            }
        },
        Commands::Journal { action } => match action {
            JournalAction::Add {
                item_id,
                content,
                title,
                mood,
                session,
                visibility,
            } => commands::journal::run_journal_add(
                &ctx,
                item_id,
                commands::journal::draft(content, title, mood, session, visibility),
            ),
            JournalAction::List {
                item,
                limit,
                offset,
                json,
            } => commands::journal::run_journal_list(&ctx, item, limit, offset, json),
            JournalAction::Edit {
                entry_id,
                content,
                title,
                mood,
                session,
                visibility,
            } => commands::journal::run_journal_edit(
                &ctx,
                entry_id,
                JournalUpdate {
                    title,
                    content,
                    mood,
                    play_session: session,
                    visibility,
                },
            ),
            JournalAction::Remove { entry_id } => {
                commands::journal::run_journal_remove(&ctx, entry_id)
            }
        },
        Commands::Ignore { action } => match action {
            IgnoreAction::Add { title } => commands::ignore::run_ignore_add(&ctx, &title),
            IgnoreAction::Remove { title } => commands::ignore::run_ignore_remove(&ctx, &title),
            IgnoreAction::List => commands::ignore::run_ignore_list(&ctx),
        },
        Commands::Stats => commands::stats::run_stats(&ctx),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&ctx),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}

/// Route `log` output to stdout. Info lines print bare so they read as
/// normal command output; `--verbose` adds timestamps and debug lines.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper_util", LevelFilter::Warn)
        .filter_module("rustls", LevelFilter::Warn)
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            if verbose {
                return writeln!(
                    buf,
                    "{} {:<5} {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.args()
                );
            }
            match record.level() {
                Level::Error => writeln!(
                    buf,
                    "{} {}",
                    "error:".if_supports_color(Stdout, |t| t.red()),
                    record.args()
                ),
                Level::Warn => writeln!(
                    buf,
                    "{} {}",
                    "warning:".if_supports_color(Stdout, |t| t.yellow()),
                    record.args()
                ),
                _ => writeln!(buf, "{}", record.args()),
            }
        });
    let _ = builder.try_init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
