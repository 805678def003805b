use std::fmt::Debug;
use std::sync::Arc;

use crate::error::RepositoryResult;
use crate::sql::SqlParam;
use crate::types::{ContentTypeRef, Language, SearchableFieldMap};

/// Read access to the configured languages.
pub trait LanguageHandler: Debug + Send + Sync {
    /// Loads a language by its code (for example `eng-GB`).
    ///
    /// Fails with `NotFound(Language)` for unknown codes.
    fn load_by_language_code(&self, code: &str) -> RepositoryResult<Language>;

    /// Loads a language by its id.
    fn load(&self, id: i64) -> RepositoryResult<Language>;

    /// Loads every language.
    fn load_all(&self) -> RepositoryResult<Vec<Language>>;
}

/// Read access to content type definitions.
pub trait ContentTypeHandler: Debug + Send + Sync {
    /// Loads a defined content type by identifier.
    ///
    /// Fails with `NotFound(ContentType)` for unknown identifiers.
    fn load_by_identifier(&self, identifier: &str) -> RepositoryResult<ContentTypeRef>;

    /// Returns the searchable field definitions of every content type.
    fn searchable_field_map(&self) -> RepositoryResult<Arc<SearchableFieldMap>>;
}

/// Field type metadata needed for emptiness checks.
pub trait FieldTypeService: Debug + Send + Sync {
    /// Returns the index representation of the field type's empty value.
    fn empty_value(&self, field_type: &str) -> RepositoryResult<SqlParam>;
}
