//! Fixed in-memory language list.

use std::collections::HashMap;

use crate::core::LanguageHandler;
use crate::error::{NotFoundError, RepositoryResult};
use crate::types::Language;

/// A [`LanguageHandler`] over a fixed list of languages.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLanguageHandler {
    languages: Vec<Language>,
    by_code: HashMap<String, usize>,
    by_id: HashMap<i64, usize>,
}

impl InMemoryLanguageHandler {
    /// Creates a handler over `languages`. Later duplicates win.
    pub fn new(languages: Vec<Language>) -> Self {
        let mut by_code = HashMap::with_capacity(languages.len());
        let mut by_id = HashMap::with_capacity(languages.len());
        for (i, language) in languages.iter().enumerate() {
            by_code.insert(language.language_code.clone(), i);
            by_id.insert(language.id, i);
        }
        Self {
            languages,
            by_code,
            by_id,
        }
    }
}

impl LanguageHandler for InMemoryLanguageHandler {
    fn load_by_language_code(&self, code: &str) -> RepositoryResult<Language> {
        self.by_code
            .get(code)
            .map(|&i| self.languages[i].clone())
            .ok_or_else(|| {
                NotFoundError::Language {
                    code: code.to_string(),
                }
                .into()
            })
    }

    fn load(&self, id: i64) -> RepositoryResult<Language> {
        self.by_id
            .get(&id)
            .map(|&i| self.languages[i].clone())
            .ok_or_else(|| NotFoundError::LanguageId { id }.into())
    }

    fn load_all(&self) -> RepositoryResult<Vec<Language>> {
        Ok(self.languages.clone())
    }
}
