//! Read-through language cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::core::LanguageHandler;
use crate::error::RepositoryResult;
use crate::types::Language;

/// Caches successful lookups of an inner [`LanguageHandler`].
///
/// Misses are forwarded to the inner handler; failures are not cached.
#[derive(Debug)]
pub struct CachingLanguageHandler {
    inner: Arc<dyn LanguageHandler>,
    by_code: RwLock<HashMap<String, Language>>,
    by_id: RwLock<HashMap<i64, Language>>,
}

impl CachingLanguageHandler {
    /// Wraps `inner`.
    pub fn new(inner: Arc<dyn LanguageHandler>) -> Self {
        Self {
            inner,
            by_code: RwLock::new(HashMap::new()),
            by_id: RwLock::new(HashMap::new()),
        }
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.by_code.write().clear();
        self.by_id.write().clear();
    }

    fn remember(&self, language: &Language) {
        self.by_code
            .write()
            .insert(language.language_code.clone(), language.clone());
        self.by_id.write().insert(language.id, language.clone());
    }
}

impl LanguageHandler for CachingLanguageHandler {
    fn load_by_language_code(&self, code: &str) -> RepositoryResult<Language> {
        if let Some(language) = self.by_code.read().get(code) {
            trace!(code, "Language cache hit");
            return Ok(language.clone());
        }

        trace!(code, "Language cache miss");
        let language = self.inner.load_by_language_code(code)?;
        self.remember(&language);
        Ok(language)
    }

    fn load(&self, id: i64) -> RepositoryResult<Language> {
        if let Some(language) = self.by_id.read().get(&id) {
            trace!(id, "Language cache hit");
            return Ok(language.clone());
        }

        trace!(id, "Language cache miss");
        let language = self.inner.load(id)?;
        self.remember(&language);
        Ok(language)
    }

    fn load_all(&self) -> RepositoryResult<Vec<Language>> {
        let languages = self.inner.load_all()?;
        for language in &languages {
            self.remember(language);
        }
        Ok(languages)
    }
}
