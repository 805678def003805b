//! SQLite backend over the legacy schema.
//!
//! # Example
//!
//! ```no_run
//! use ibexa_legacy_search::backends::sqlite::{ContentSearchGateway, SqliteDatabase};
//! use ibexa_legacy_search::types::{Criterion, LanguageSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = SqliteDatabase::open("legacy.db")?;
//! let gateway = ContentSearchGateway::new(db.clone(), db.search_context());
//!
//! let criterion = Criterion::content_type_identifier(["article"])?;
//! let hits = gateway.find(&criterion, &LanguageSettings::default(), 0, Some(25))?;
//! println!("{} matches", hits.total_count);
//! # Ok(())
//! # }
//! ```

mod database;
mod gateway;
mod handlers;
mod schema;

pub use database::{SqliteDatabase, SqliteDatabaseConfig};
pub use gateway::{ContentSearchGateway, ContentTypeGateway, LocationSearchGateway, SearchHits};
pub use handlers::{SqliteContentTypeHandler, SqliteLanguageHandler};
pub use schema::{SCHEMA_VERSION, initialize_schema};
