//! Legacy schema subset read by the search engine.

use rusqlite::Connection;

use crate::error::{BackendError, RepositoryResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates the legacy tables unless they already exist.
pub fn initialize_schema(conn: &Connection) -> RepositoryResult<()> {
    if get_schema_version(conn)? == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    }
    Ok(())
}

fn schema_error(context: &str, e: rusqlite::Error) -> BackendError {
    BackendError::SchemaError {
        message: format!("{}: {}", context, e),
    }
}

fn get_schema_version(conn: &Connection) -> RepositoryResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS legacy_search_schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| schema_error("Failed to create schema version table", e))?;

    let version: Option<i32> = conn
        .query_row(
            "SELECT version FROM legacy_search_schema_version LIMIT 1",
            [],
            |row| row.get(0),
        )
        .ok();

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> RepositoryResult<()> {
    conn.execute("DELETE FROM legacy_search_schema_version", [])
        .map_err(|e| schema_error("Failed to clear schema version", e))?;
    conn.execute(
        "INSERT INTO legacy_search_schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| schema_error("Failed to set schema version", e))?;
    Ok(())
}

fn create_schema_v1(conn: &Connection) -> RepositoryResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS ezcontent_language (
            id INTEGER PRIMARY KEY,
            locale TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL DEFAULT '',
            disabled INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS ezsection (
            id INTEGER PRIMARY KEY,
            identifier TEXT NOT NULL,
            name TEXT NOT NULL DEFAULT '',
            locale TEXT NOT NULL DEFAULT '',
            navigation_part_identifier TEXT NOT NULL DEFAULT 'ezcontentnavigationpart'
        );

        CREATE TABLE IF NOT EXISTS ezcontentclassgroup (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            is_system INTEGER NOT NULL DEFAULT 0,
            created INTEGER NOT NULL DEFAULT 0,
            modified INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS ezcontentclass (
            id INTEGER NOT NULL,
            version INTEGER NOT NULL DEFAULT 0,
            identifier TEXT NOT NULL,
            remote_id TEXT NOT NULL DEFAULT '',
            always_available INTEGER NOT NULL DEFAULT 0,
            is_container INTEGER NOT NULL DEFAULT 0,
            initial_language_id INTEGER NOT NULL DEFAULT 0,
            language_mask INTEGER NOT NULL DEFAULT 0,
            created INTEGER NOT NULL DEFAULT 0,
            modified INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (id, version)
        );
        CREATE INDEX IF NOT EXISTS ezcontentclass_identifier
            ON ezcontentclass (identifier, version);

        CREATE TABLE IF NOT EXISTS ezcontentclass_attribute (
            id INTEGER NOT NULL,
            version INTEGER NOT NULL DEFAULT 0,
            contentclass_id INTEGER NOT NULL,
            identifier TEXT NOT NULL,
            data_type_string TEXT NOT NULL,
            is_searchable INTEGER NOT NULL DEFAULT 1,
            is_required INTEGER NOT NULL DEFAULT 0,
            placement INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (id, version)
        );

        CREATE TABLE IF NOT EXISTS ezcontentclass_classgroup (
            contentclass_id INTEGER NOT NULL,
            contentclass_version INTEGER NOT NULL DEFAULT 0,
            group_id INTEGER NOT NULL,
            group_name TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (contentclass_id, contentclass_version, group_id)
        );

        CREATE TABLE IF NOT EXISTS ezcontentobject (
            id INTEGER PRIMARY KEY,
            contentclass_id INTEGER NOT NULL,
            section_id INTEGER NOT NULL DEFAULT 0,
            owner_id INTEGER NOT NULL DEFAULT 0,
            remote_id TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL DEFAULT '',
            current_version INTEGER NOT NULL DEFAULT 1,
            initial_language_id INTEGER NOT NULL DEFAULT 0,
            language_mask INTEGER NOT NULL DEFAULT 0,
            published INTEGER NOT NULL DEFAULT 0,
            modified INTEGER NOT NULL DEFAULT 0,
            status INTEGER NOT NULL DEFAULT 0,
            is_hidden INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS ezcontentobject_version (
            id INTEGER PRIMARY KEY,
            contentobject_id INTEGER NOT NULL,
            version INTEGER NOT NULL,
            creator_id INTEGER NOT NULL DEFAULT 0,
            created INTEGER NOT NULL DEFAULT 0,
            modified INTEGER NOT NULL DEFAULT 0,
            status INTEGER NOT NULL DEFAULT 0,
            initial_language_id INTEGER NOT NULL DEFAULT 0,
            language_mask INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS ezcontentobject_version_object
            ON ezcontentobject_version (contentobject_id, version);

        CREATE TABLE IF NOT EXISTS ezcontentobject_attribute (
            id INTEGER NOT NULL,
            version INTEGER NOT NULL,
            contentobject_id INTEGER NOT NULL,
            contentclassattribute_id INTEGER NOT NULL,
            data_type_string TEXT NOT NULL DEFAULT '',
            language_code TEXT NOT NULL DEFAULT '',
            language_id INTEGER NOT NULL DEFAULT 0,
            data_float REAL,
            data_int INTEGER,
            data_text TEXT,
            sort_key_int INTEGER NOT NULL DEFAULT 0,
            sort_key_string TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (id, version)
        );
        CREATE INDEX IF NOT EXISTS ezcontentobject_attribute_object
            ON ezcontentobject_attribute (contentobject_id, version);

        CREATE TABLE IF NOT EXISTS ezcontentobject_name (
            contentobject_id INTEGER NOT NULL,
            content_version INTEGER NOT NULL,
            content_translation TEXT NOT NULL,
            real_translation TEXT NOT NULL DEFAULT '',
            language_id INTEGER NOT NULL DEFAULT 0,
            name TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (contentobject_id, content_version, content_translation)
        );

        CREATE TABLE IF NOT EXISTS ezcontentobject_tree (
            node_id INTEGER PRIMARY KEY,
            parent_node_id INTEGER NOT NULL,
            main_node_id INTEGER NOT NULL,
            contentobject_id INTEGER NOT NULL,
            contentobject_version INTEGER NOT NULL DEFAULT 1,
            contentobject_is_published INTEGER NOT NULL DEFAULT 1,
            depth INTEGER NOT NULL DEFAULT 0,
            path_string TEXT NOT NULL,
            priority INTEGER NOT NULL DEFAULT 0,
            remote_id TEXT NOT NULL DEFAULT '',
            is_hidden INTEGER NOT NULL DEFAULT 0,
            is_invisible INTEGER NOT NULL DEFAULT 0,
            sort_field INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 1
        );
        CREATE INDEX IF NOT EXISTS ezcontentobject_tree_object
            ON ezcontentobject_tree (contentobject_id);
        CREATE INDEX IF NOT EXISTS ezcontentobject_tree_path
            ON ezcontentobject_tree (path_string);

        CREATE TABLE IF NOT EXISTS ezcontentobject_trash (
            node_id INTEGER PRIMARY KEY,
            parent_node_id INTEGER NOT NULL,
            main_node_id INTEGER NOT NULL,
            contentobject_id INTEGER NOT NULL,
            contentobject_version INTEGER NOT NULL DEFAULT 1,
            contentobject_is_published INTEGER NOT NULL DEFAULT 1,
            depth INTEGER NOT NULL DEFAULT 0,
            path_string TEXT NOT NULL,
            priority INTEGER NOT NULL DEFAULT 0,
            remote_id TEXT NOT NULL DEFAULT '',
            is_hidden INTEGER NOT NULL DEFAULT 0,
            is_invisible INTEGER NOT NULL DEFAULT 0,
            sort_field INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 1,
            trashed INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS ezcobj_state_link (
            contentobject_id INTEGER NOT NULL,
            contentobject_state_id INTEGER NOT NULL,
            PRIMARY KEY (contentobject_id, contentobject_state_id)
        );
        ",
    )
    .map_err(|e| schema_error("Failed to create legacy schema", e))?;

    Ok(())
}
