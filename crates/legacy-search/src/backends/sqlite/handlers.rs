//! Collaborators reading from the legacy tables.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rusqlite::{OptionalExtension, Row};
use tracing::{debug, trace};

use crate::core::{ContentTypeHandler, LanguageHandler};
use crate::error::{NotFoundError, RepositoryResult};
use crate::types::{ContentTypeRef, Language, SearchableField, SearchableFieldMap};

use super::database::SqliteDatabase;

const LANGUAGE_COLUMNS: &str = "SELECT id, locale, name, disabled FROM ezcontent_language";

/// Languages from `ezcontent_language`.
#[derive(Debug, Clone)]
pub struct SqliteLanguageHandler {
    db: SqliteDatabase,
}

impl SqliteLanguageHandler {
    /// Creates the handler.
    pub fn new(db: SqliteDatabase) -> Self {
        Self { db }
    }

    fn row_to_language(row: &Row<'_>) -> rusqlite::Result<Language> {
        Ok(Language {
            id: row.get(0)?,
            language_code: row.get(1)?,
            name: row.get(2)?,
            is_enabled: row.get::<_, i64>(3)? == 0,
        })
    }
}

impl LanguageHandler for SqliteLanguageHandler {
    fn load_by_language_code(&self, code: &str) -> RepositoryResult<Language> {
        let conn = self.db.connection()?;
        let language = conn
            .query_row(
                &format!("{} WHERE locale = ?1", LANGUAGE_COLUMNS),
                [code],
                Self::row_to_language,
            )
            .optional()?;

        language.ok_or_else(|| {
            NotFoundError::Language {
                code: code.to_string(),
            }
            .into()
        })
    }

    fn load(&self, id: i64) -> RepositoryResult<Language> {
        let conn = self.db.connection()?;
        let language = conn
            .query_row(
                &format!("{} WHERE id = ?1", LANGUAGE_COLUMNS),
                [id],
                Self::row_to_language,
            )
            .optional()?;

        language.ok_or_else(|| NotFoundError::LanguageId { id }.into())
    }

    fn load_all(&self) -> RepositoryResult<Vec<Language>> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", LANGUAGE_COLUMNS))?;
        let languages = stmt
            .query_map([], Self::row_to_language)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(languages)
    }
}

/// Content types from `ezcontentclass`, defined version only.
///
/// The searchable field map is built once and cached until
/// [`SqliteContentTypeHandler::clear_cache`] is called.
#[derive(Debug)]
pub struct SqliteContentTypeHandler {
    db: SqliteDatabase,
    field_map: RwLock<Option<Arc<SearchableFieldMap>>>,
}

impl SqliteContentTypeHandler {
    /// Creates the handler.
    pub fn new(db: SqliteDatabase) -> Self {
        Self {
            db,
            field_map: RwLock::new(None),
        }
    }

    /// Drops the cached searchable field map.
    pub fn clear_cache(&self) {
        *self.field_map.write() = None;
    }

    fn load_field_map(&self) -> RepositoryResult<SearchableFieldMap> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(
            "SELECT c.identifier, a.identifier, a.id, a.data_type_string
             FROM ezcontentclass c
             INNER JOIN ezcontentclass_attribute a
                ON a.contentclass_id = c.id AND a.version = c.version
             WHERE c.version = 0 AND a.is_searchable = 1
             ORDER BY c.identifier, a.identifier",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                SearchableField {
                    field_definition_id: row.get(2)?,
                    field_type_identifier: row.get(3)?,
                },
            ))
        })?;

        let mut map: SearchableFieldMap = BTreeMap::new();
        for row in rows {
            let (content_type, field, searchable) = row?;
            map.entry(content_type).or_default().insert(field, searchable);
        }
        Ok(map)
    }
}

impl ContentTypeHandler for SqliteContentTypeHandler {
    fn load_by_identifier(&self, identifier: &str) -> RepositoryResult<ContentTypeRef> {
        let conn = self.db.connection()?;
        let content_type = conn
            .query_row(
                "SELECT id, identifier FROM ezcontentclass WHERE identifier = ?1 AND version = 0",
                [identifier],
                |row| {
                    Ok(ContentTypeRef {
                        id: row.get(0)?,
                        identifier: row.get(1)?,
                    })
                },
            )
            .optional()?;

        content_type.ok_or_else(|| {
            NotFoundError::ContentType {
                identifier: identifier.to_string(),
            }
            .into()
        })
    }

    fn searchable_field_map(&self) -> RepositoryResult<Arc<SearchableFieldMap>> {
        if let Some(map) = self.field_map.read().as_ref() {
            trace!("Searchable field map cache hit");
            return Ok(map.clone());
        }

        let map = Arc::new(self.load_field_map()?);
        debug!(content_types = map.len(), "Loaded searchable field map");
        *self.field_map.write() = Some(map.clone());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SqliteDatabase {
        let db = SqliteDatabase::in_memory().unwrap();
        db.connection()
            .unwrap()
            .execute_batch(
                "INSERT INTO ezcontent_language (id, locale, name) VALUES (2, 'eng-GB', 'English');
                 INSERT INTO ezcontent_language (id, locale, name, disabled) VALUES (4, 'ger-DE', 'German', 1);
                 INSERT INTO ezcontentclass (id, version, identifier) VALUES (1, 0, 'folder');
                 INSERT INTO ezcontentclass (id, version, identifier) VALUES (2, 1, 'draft_only');
                 INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
                     VALUES (4, 0, 1, 'name', 'ezstring', 1);
                 INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
                     VALUES (5, 0, 1, 'image', 'ezimage', 0);",
            )
            .unwrap();
        db
    }

    #[test]
    fn test_language_lookup() {
        let handler = SqliteLanguageHandler::new(seeded());
        let german = handler.load_by_language_code("ger-DE").unwrap();
        assert_eq!(german.id, 4);
        assert!(!german.is_enabled);
        assert!(handler.load(8).unwrap_err().is_not_found());
        assert_eq!(handler.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_content_type_lookup_ignores_drafts() {
        let handler = SqliteContentTypeHandler::new(seeded());
        assert_eq!(handler.load_by_identifier("folder").unwrap().id, 1);
        assert!(handler.load_by_identifier("draft_only").unwrap_err().is_not_found());
    }

    #[test]
    fn test_field_map_reloads_after_clear_cache() {
        let db = seeded();
        let handler = SqliteContentTypeHandler::new(db.clone());
        assert_eq!(handler.searchable_field_map().unwrap()["folder"].len(), 1);

        db.connection()
            .unwrap()
            .execute(
                "INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
                     VALUES (6, 0, 1, 'short_name', 'ezstring', 1)",
                [],
            )
            .unwrap();
        assert_eq!(handler.searchable_field_map().unwrap()["folder"].len(), 1);

        handler.clear_cache();
        let map = handler.searchable_field_map().unwrap();
        assert_eq!(map["folder"].len(), 2);
        assert_eq!(map["folder"]["short_name"].field_definition_id, 6);
    }

    #[test]
    fn test_field_map_only_has_searchable_fields() {
        let handler = SqliteContentTypeHandler::new(seeded());
        let map = handler.searchable_field_map().unwrap();
        let folder = &map["folder"];
        assert_eq!(folder.len(), 1);
        assert_eq!(folder["name"].field_type_identifier, "ezstring");

        let again = handler.searchable_field_map().unwrap();
        assert!(Arc::ptr_eq(&map, &again));
    }
}
