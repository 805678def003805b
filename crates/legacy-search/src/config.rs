//! Search configuration.
//!
//! Loaded from JSON; every field has a default:
//!
//! ```json
//! {
//!   "languages": ["ger-DE", "eng-GB"],
//!   "use_always_available": true,
//!   "database": { "max_connections": 4, "busy_timeout_ms": 2000 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgumentError, RepositoryResult};
use crate::types::LanguageSettings;

#[cfg(feature = "sqlite")]
use crate::backends::sqlite::SqliteDatabaseConfig;

/// Default language settings and database options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Prioritized language codes applied to language-sensitive criteria.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Fall back to always-available translations.
    #[serde(default = "default_true")]
    pub use_always_available: bool,

    /// Connection pool settings.
    #[cfg(feature = "sqlite")]
    #[serde(default)]
    pub database: SqliteDatabaseConfig,
}

fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            use_always_available: true,
            #[cfg(feature = "sqlite")]
            database: SqliteDatabaseConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Parses a JSON configuration document.
    pub fn from_json_str(json: &str) -> RepositoryResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            InvalidArgumentError::MalformedValue {
                argument: "config".to_string(),
                source: Box::new(e),
            }
            .into()
        })
    }

    /// Reads a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| InvalidArgumentError::MalformedValue {
            argument: path.display().to_string(),
            source: Box::new(e),
        })?;
        Self::from_json_str(&json)
    }

    /// Returns the language settings described by this configuration.
    pub fn language_settings(&self) -> LanguageSettings {
        LanguageSettings::new(self.languages.iter().cloned())
            .with_always_available(self.use_always_available)
    }
}
