//! Language value objects.

use serde::{Deserialize, Serialize};

/// A registered content language.
///
/// `id` is the language's bit in content and field language masks. It is a
/// power of two greater than one; bit 0 is reserved for the always-available
/// flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    /// Mask bit of the language.
    pub id: i64,
    /// Locale code, e.g. `eng-GB`.
    pub language_code: String,
    /// Human-readable name.
    pub name: String,
    /// Whether the language is enabled.
    pub is_enabled: bool,
}

impl Language {
    /// Creates an enabled language.
    pub fn new(id: i64, language_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            language_code: language_code.into(),
            name: name.into(),
            is_enabled: true,
        }
    }

    /// Returns true if `id` is a usable language bit.
    pub fn has_valid_id(&self) -> bool {
        self.id > 1 && (self.id & (self.id - 1)) == 0
    }
}

/// Language filtering applied to language-sensitive criteria.
///
/// `languages` is ordered by priority, the first entry wins. An empty list
/// means "main language only".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSettings {
    /// Prioritized language codes.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Fall back to always-available translations.
    #[serde(default = "default_true")]
    pub use_always_available: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            use_always_available: true,
        }
    }
}

impl LanguageSettings {
    /// Creates settings for the given prioritized languages.
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            use_always_available: true,
        }
    }

    /// Sets the always-available fallback.
    pub fn with_always_available(mut self, use_always_available: bool) -> Self {
        self.use_always_available = use_always_available;
        self
    }

    /// Returns true if no prioritized languages are set.
    pub fn is_main_language_only(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_id_validity() {
        assert!(Language::new(2, "eng-GB", "English").has_valid_id());
        assert!(Language::new(64, "fre-FR", "French").has_valid_id());
        assert!(!Language::new(1, "xxx-XX", "Reserved").has_valid_id());
        assert!(!Language::new(6, "yyy-YY", "Two bits").has_valid_id());
    }

    #[test]
    fn test_settings_defaults() {
        let settings: LanguageSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.is_main_language_only());
        assert!(settings.use_always_available);
        assert_eq!(settings, LanguageSettings::default());
    }
}
