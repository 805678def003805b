use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, OpenFlags, ToSql};
use serde::{Deserialize, Serialize};

use crate::core::{LowercaseTransformation, TransformationProcessor};
use crate::error::{BackendError, RepositoryResult};
use crate::field_value::{DefaultFieldTypeService, FieldValueConverterRegistry};
use crate::language::CachingLanguageHandler;
use crate::search::SearchContext;
use crate::sql::SqlParam;

use super::handlers::{SqliteContentTypeHandler, SqliteLanguageHandler};
use super::schema;

/// A pooled SQLite database holding the legacy schema.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: Pool<SqliteConnectionManager>,
    config: SqliteDatabaseConfig,
    is_memory: bool,
    read_only: bool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatabase")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}

/// Connection pool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteDatabaseConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable foreign key constraints.
    #[serde(default = "default_true")]
    pub enable_foreign_keys: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteDatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_foreign_keys: true,
        }
    }
}

impl SqliteDatabase {
    /// Creates an in-memory database with the legacy schema.
    pub fn in_memory() -> RepositoryResult<Self> {
        let db = Self::with_config(":memory:", SqliteDatabaseConfig::default())?;
        db.init_schema()?;
        Ok(db)
    }

    /// Opens an existing database file.
    pub fn open<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        Self::with_config(path, SqliteDatabaseConfig::default())
    }

    /// Opens a database with custom pool settings.
    ///
    /// Every connection of an in-memory database sees its own empty
    /// database, so the pool is pinned to one connection.
    pub fn with_config<P: AsRef<Path>>(path: P, config: SqliteDatabaseConfig) -> RepositoryResult<Self> {
        Self::build(path.as_ref(), config, false)
    }

    /// Opens an existing database file without write access.
    ///
    /// The schema is neither created nor migrated.
    pub fn open_read_only<P: AsRef<Path>>(path: P, config: SqliteDatabaseConfig) -> RepositoryResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BackendError::ConnectionFailed {
                backend_name: "sqlite".to_string(),
                message: format!("database file '{}' does not exist", path.display()),
            }
            .into());
        }
        Self::build(path, config, true)
    }

    fn build(path: &Path, config: SqliteDatabaseConfig, read_only: bool) -> RepositoryResult<Self> {
        let is_memory = path.to_string_lossy() == ":memory:";

        let busy_timeout = Duration::from_millis(u64::from(config.busy_timeout_ms));
        let foreign_keys = config.enable_foreign_keys;
        let manager = if is_memory {
            SqliteConnectionManager::memory()
        } else if read_only {
            SqliteConnectionManager::file(path).with_flags(
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
        } else {
            SqliteConnectionManager::file(path)
        };
        let manager = manager.with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            if foreign_keys {
                conn.execute_batch("PRAGMA foreign_keys = ON")?;
            }
            register_functions(conn)
        });

        let (max_size, min_idle) = if is_memory {
            (1, 1)
        } else {
            (config.max_connections, config.min_connections)
        };

        let mut builder = Pool::builder()
            .max_size(max_size)
            .min_idle(Some(min_idle))
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms));
        if is_memory {
            // Recycling the only connection would drop the database.
            builder = builder.idle_timeout(None).max_lifetime(None);
        }

        let pool = builder
            .build(manager)
            .map_err(|e| BackendError::ConnectionFailed {
                backend_name: "sqlite".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            pool,
            config,
            is_memory,
            read_only,
        })
    }

    /// Creates the legacy tables if they do not exist.
    pub fn init_schema(&self) -> RepositoryResult<()> {
        let conn = self.connection()?;
        schema::initialize_schema(&conn)
    }

    /// Gets a connection from the pool.
    pub fn connection(&self) -> RepositoryResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| {
            BackendError::ConnectionFailed {
                backend_name: "sqlite".to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    /// Returns whether connections are opened read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns the pool settings.
    pub fn config(&self) -> &SqliteDatabaseConfig {
        &self.config
    }

    /// Builds a search context whose collaborators read from this database.
    ///
    /// Language lookups are cached.
    pub fn search_context(&self) -> SearchContext {
        let registry = Arc::new(FieldValueConverterRegistry::with_defaults());
        let languages = Arc::new(CachingLanguageHandler::new(Arc::new(
            SqliteLanguageHandler::new(self.clone()),
        )));
        SearchContext::new(
            languages,
            Arc::new(SqliteContentTypeHandler::new(self.clone())),
            Arc::new(DefaultFieldTypeService::new(registry.clone())),
            registry,
        )
    }
}

/// Replaces SQLite's ASCII-only `lower()` with the Unicode folding used for
/// bound search values, so both sides of a case-insensitive match agree.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            Ok(match ctx.get_raw(0) {
                ValueRef::Text(text) => rusqlite::types::Value::Text(
                    LowercaseTransformation.lowercase(&String::from_utf8_lossy(text)),
                ),
                other => rusqlite::types::Value::from(other),
            })
        },
    )
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlParam::Integer(i) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*i)),
            SqlParam::Float(f) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*f)),
            SqlParam::String(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlParam::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
        })
    }
}
