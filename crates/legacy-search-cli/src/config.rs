//! Command line configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LEGACY_SEARCH_DATABASE` | `:memory:` | SQLite database holding the legacy schema |
//! | `LEGACY_SEARCH_CONFIG` | | JSON search configuration file |
//! | `LEGACY_SEARCH_LOG_LEVEL` | warn | Log level |

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ibexa_legacy_search::{LanguageSettings, SearchConfig};

/// Which gateway a criterion is translated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Family {
    /// Content search.
    Content,
    /// Location search.
    Location,
    /// Trashed location search.
    Trash,
    /// Content type search.
    ContentType,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Content => write!(f, "content"),
            Family::Location => write!(f, "location"),
            Family::Trash => write!(f, "trash"),
            Family::ContentType => write!(f, "content-type"),
        }
    }
}

/// Translates a JSON criterion tree into legacy schema SQL.
#[derive(Debug, Clone, Parser)]
#[command(name = "legacy-search")]
#[command(about = "Translate search criteria into SQL over the legacy content schema")]
#[command(version)]
pub struct CliConfig {
    /// SQLite database holding the legacy schema.
    #[arg(long, env = "LEGACY_SEARCH_DATABASE", default_value = ":memory:")]
    pub database: String,

    /// JSON search configuration file.
    #[arg(long, env = "LEGACY_SEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// File holding the criterion as JSON. Reads stdin when omitted or `-`.
    #[arg(long)]
    pub criterion: Option<PathBuf>,

    /// Criterion family.
    #[arg(long, value_enum, default_value_t = Family::Content)]
    pub family: Family,

    /// Prioritized language code. Repeat for several, highest priority first.
    #[arg(long = "language")]
    pub languages: Vec<String>,

    /// Do not fall back to always-available translations.
    #[arg(long)]
    pub no_always_available: bool,

    /// Run the query and report matching ids.
    #[arg(long)]
    pub execute: bool,

    /// Maximum number of ids to return.
    #[arg(long)]
    pub limit: Option<u64>,

    /// Number of ids to skip.
    #[arg(long, default_value = "0")]
    pub offset: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "LEGACY_SEARCH_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl CliConfig {
    /// Returns true if the database lives in memory.
    pub fn is_memory_database(&self) -> bool {
        self.database == ":memory:"
    }

    /// Returns true if the criterion is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.criterion
            .as_ref()
            .is_none_or(|path| path.as_os_str() == "-")
    }

    /// Merges command line languages over the configuration file.
    ///
    /// Languages given on the command line replace the configured list.
    pub fn language_settings(&self, search: &SearchConfig) -> LanguageSettings {
        let mut settings = if self.languages.is_empty() {
            search.language_settings()
        } else {
            LanguageSettings::new(self.languages.iter().cloned())
                .with_always_available(search.use_always_available)
        };
        if self.no_always_available {
            settings.use_always_available = false;
        }
        settings
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.database.trim().is_empty() {
            errors.push("Database path cannot be empty".to_string());
        }

        if self.limit == Some(0) {
            errors.push("Limit cannot be 0".to_string());
        }

        if (self.limit.is_some() || self.offset > 0) && self.family == Family::ContentType {
            errors.push("Paging is not supported for content type search".to_string());
        }

        if self.family == Family::ContentType && !self.languages.is_empty() {
            errors.push("Content type search is not language sensitive".to_string());
        }

        if self.execute && self.is_memory_database() {
            errors.push("--execute needs a database file (--database)".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
