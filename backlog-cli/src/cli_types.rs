//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use backlog_catalog::{JournalMood, JournalVisibility, LibraryItemStatus};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "backlog")]
#[command(about = "Track a game backlog: import owned games, match them, fill in play times", long_about = None)]
pub(crate) struct Cli {
    /// Library database (defaults to the settings file, then the data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Library owner (defaults to user_id from settings.toml)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Search IGDB for games by title
    Search {
        /// Title to search for
        query: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Search the local catalog instead of IGDB
        #[arg(long)]
        local: bool,
    },

    /// Add a game to the library by IGDB id
    Add {
        /// IGDB game id
        igdb_id: String,

        /// Initial status (exploring, in_progress, completed, abandoned, wishlist, revisiting)
        #[arg(short, long, default_value = "exploring")]
        status: LibraryItemStatus,

        /// How the game was obtained
        #[arg(long, default_value = "digital", value_parser = ["digital", "physical", "subscription"])]
        acquisition: String,
    },

    /// Import owned games from an external account
    Import {
        #[command(subcommand)]
        source: ImportSource,
    },

    /// Fill in missing completion times and cover art
    Enrich {
        /// Maximum number of games to process
        #[arg(short, long)]
        limit: Option<u32>,

        /// Lookups in flight at once (defaults to settings.toml)
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,
    },

    /// Inspect and edit library items
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Keep notes about the games you play
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },

    /// Manage titles excluded from imports
    Ignore {
        #[command(subcommand)]
        action: IgnoreAction,
    },

    /// Summarize the library: counts per status, hours played, backlog size
    Stats,

    /// Show configuration and credentials
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ImportSource {
    /// Import a Steam account's owned games
    Steam {
        /// SteamID64 (defaults to steam_account from settings.toml)
        steam_id: Option<String>,

        /// Keep demos, soundtracks, DLC, test builds and tools
        #[arg(long)]
        include_non_games: bool,

        /// Match by title only, without asking IGDB which game each Steam app is
        #[arg(long)]
        no_igdb_links: bool,

        /// Steam Web API key for this run (overrides env and config)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum LibraryAction {
    /// List library items
    List {
        /// Only items with this status
        #[arg(short, long)]
        status: Option<LibraryItemStatus>,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change an item's status
    Status {
        item_id: i64,
        status: LibraryItemStatus,
    },

    /// Rate (1-10) and/or review an item
    Review {
        item_id: i64,

        #[arg(short, long)]
        rating: Option<u8>,

        /// Review text
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Remove an item from the library
    Remove { item_id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum JournalAction {
    /// Write an entry about a library item
    Add {
        item_id: i64,

        /// Entry text
        content: String,

        #[arg(short, long)]
        title: Option<String>,

        /// excited, relaxed, frustrated, accomplished, curious or nostalgic
        #[arg(short, long)]
        mood: Option<JournalMood>,

        /// Which play session this is about (1, 2, ...)
        #[arg(short, long)]
        session: Option<u32>,

        /// private, friends_only or public
        #[arg(long, default_value = "private")]
        visibility: JournalVisibility,
    },

    /// List entries, newest first
    List {
        /// Only entries about this library item's game
        #[arg(short, long)]
        item: Option<i64>,

        #[arg(short, long)]
        limit: Option<u32>,

        /// Skip this many entries
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change an entry; omitted fields stay as they are
    Edit {
        entry_id: i64,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        mood: Option<JournalMood>,

        #[arg(short, long)]
        session: Option<u32>,

        #[arg(long)]
        visibility: Option<JournalVisibility>,
    },

    /// Delete an entry
    Remove { entry_id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum IgnoreAction {
    /// Never import this title
    Add { title: String },

    /// Allow this title to be imported again
    Remove { title: String },

    /// List ignored titles
    List,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings, credentials and their sources
    Show,

    /// Print the config file paths
    Path,
}
