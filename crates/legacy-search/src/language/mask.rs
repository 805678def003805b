//! Language bitmask generation.
//!
//! Content objects and field rows carry an integer mask in which each
//! language owns one bit. Bit 0 marks a translation as always available.

use std::sync::Arc;

use crate::core::LanguageHandler;
use crate::error::{InvalidArgumentError, RepositoryResult};
use crate::types::Language;

/// The always-available flag.
pub const ALWAYS_AVAILABLE_BIT: i64 = 1;

/// Builds and decomposes language masks.
#[derive(Debug, Clone)]
pub struct MaskGenerator {
    languages: Arc<dyn LanguageHandler>,
}

impl MaskGenerator {
    /// Creates a mask generator backed by the given language handler.
    pub fn new(languages: Arc<dyn LanguageHandler>) -> Self {
        Self { languages }
    }

    /// ORs the bits of every language code, plus bit 0 if requested.
    ///
    /// Fails with `NotFound(Language)` for unknown codes.
    pub fn generate_language_mask<I, S>(&self, codes: I, always_available: bool) -> RepositoryResult<i64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = 0;
        for code in codes {
            let language = self.languages.load_by_language_code(code.as_ref())?;
            mask |= checked_id(&language)?;
        }
        Ok(with_flag(mask, always_available))
    }

    /// ORs the given language ids, plus bit 0 if requested.
    pub fn generate_language_mask_from_ids<I>(&self, ids: I, always_available: bool) -> RepositoryResult<i64>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut mask = 0;
        for id in ids {
            let language = self.languages.load(id)?;
            mask |= checked_id(&language)?;
        }
        Ok(with_flag(mask, always_available))
    }

    /// The language's own bit, plus bit 0 if requested.
    pub fn generate_language_indicator(&self, code: &str, always_available: bool) -> RepositoryResult<i64> {
        let language = self.languages.load_by_language_code(code)?;
        Ok(with_flag(checked_id(&language)?, always_available))
    }

    /// Returns true if bit 0 is set.
    pub fn is_always_available(&self, mask: i64) -> bool {
        mask & ALWAYS_AVAILABLE_BIT != 0
    }

    /// Clears bit 0.
    pub fn remove_always_available_flag(&self, mask: i64) -> i64 {
        mask & !ALWAYS_AVAILABLE_BIT
    }

    /// Returns the language bits set in `mask`, lowest first. Bit 0 is ignored.
    pub fn extract_language_ids_from_mask(&self, mask: i64) -> Vec<i64> {
        (1..63)
            .map(|bit| 1_i64 << bit)
            .filter(|id| mask & id != 0)
            .collect()
    }

    /// Returns the codes of the languages set in `mask`, lowest bit first.
    pub fn extract_language_codes_from_mask(&self, mask: i64) -> RepositoryResult<Vec<String>> {
        self.extract_language_ids_from_mask(mask)
            .into_iter()
            .map(|id| self.languages.load(id).map(|language| language.language_code))
            .collect()
    }
}

fn with_flag(mask: i64, always_available: bool) -> i64 {
    if always_available {
        mask | ALWAYS_AVAILABLE_BIT
    } else {
        mask
    }
}

fn checked_id(language: &Language) -> RepositoryResult<i64> {
    if language.has_valid_id() {
        Ok(language.id)
    } else {
        Err(InvalidArgumentError::InvalidValue {
            argument: "language.id".to_string(),
            message: format!(
                "language '{}' has id {}, expected a single bit greater than 1",
                language.language_code, language.id
            ),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::language::InMemoryLanguageHandler;

    fn generator() -> MaskGenerator {
        let handler = InMemoryLanguageHandler::new(vec![
            Language::new(2, "eng-GB", "English (United Kingdom)"),
            Language::new(4, "ger-DE", "German"),
            Language::new(16, "fre-FR", "French"),
            Language::new(6, "bad-XX", "Broken"),
        ]);
        MaskGenerator::new(Arc::new(handler))
    }

    #[test]
    fn test_generate_mask() {
        let masks = generator();
        assert_eq!(masks.generate_language_mask(["eng-GB", "fre-FR"], false).unwrap(), 18);
        assert_eq!(masks.generate_language_mask(["eng-GB", "fre-FR"], true).unwrap(), 19);
        assert_eq!(masks.generate_language_mask(Vec::<&str>::new(), true).unwrap(), 1);
    }

    #[test]
    fn test_generate_mask_from_ids() {
        let masks = generator();
        assert_eq!(masks.generate_language_mask_from_ids([4, 16], true).unwrap(), 21);
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        let err = generator()
            .generate_language_mask(["nor-NO"], false)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_language_id_is_rejected() {
        let err = generator()
            .generate_language_indicator("bad-XX", false)
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidArgument(_)));
    }

    #[test]
    fn test_indicator_and_flag() {
        let masks = generator();
        let indicator = masks.generate_language_indicator("ger-DE", true).unwrap();
        assert_eq!(indicator, 5);
        assert!(masks.is_always_available(indicator));
        assert_eq!(masks.remove_always_available_flag(indicator), 4);
        assert!(!masks.is_always_available(4));
    }

    #[test]
    fn test_mask_round_trip() {
        let masks = generator();
        let codes = ["ger-DE", "eng-GB", "fre-FR"];
        let mask = masks.generate_language_mask(codes, true).unwrap();

        assert_eq!(masks.extract_language_ids_from_mask(mask), vec![2, 4, 16]);
        let mut extracted = masks.extract_language_codes_from_mask(mask).unwrap();
        extracted.sort();
        let mut expected: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        expected.sort();
        assert_eq!(extracted, expected);
    }
}
