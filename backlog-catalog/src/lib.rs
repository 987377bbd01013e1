//! Game library data model types, title handling, and fuzzy matching.
//!
//! This crate defines the persistent data model for the library without
//! any database or network dependencies. Consumers can use these types
//! directly for serialization, display, or passing to `backlog-db` for
//! persistence.

pub mod matcher;
pub mod playtime;
pub mod title;
pub mod types;

pub use matcher::{DEFAULT_THRESHOLD, Matcher, TitleMatch, title_distance};
pub use playtime::{minutes_to_hours, seconds_to_hours};
pub use title::{TitleKind, classify_title, normalize_title, sequel_number};
pub use types::*;
