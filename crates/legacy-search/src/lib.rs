//! Ibexa Legacy Search Engine
//!
//! This crate translates typed search criteria into parameterized SQL over
//! the legacy eZ/Ibexa content schema (`ezcontentobject`, `ezcontentclass`,
//! `ezcontentobject_tree`, ...). It covers two criterion families:
//!
//! - **Content and location search** - [`types::Criterion`] translated by
//!   [`search::CriteriaConverter`]
//! - **Content type search** - [`types::ContentTypeCriterion`] translated by
//!   [`content_type::ContentTypeCriteriaConverter`]
//!
//! Handlers return an immutable [`sql::SqlExpr`] tree. Gateways attach it to
//! a [`sql::Select`] and render it into SQL text with positional `?N`
//! placeholders plus the bound values.
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite gateways and collaborators over a legacy database
//!
//! # Example
//!
//! ```
//! use ibexa_legacy_search::types::{Criterion, DateMetadataTarget, Specification};
//!
//! # #[cfg(feature = "sqlite")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ibexa_legacy_search::backends::sqlite::{ContentSearchGateway, SqliteDatabase};
//! use ibexa_legacy_search::types::LanguageSettings;
//!
//! let db = SqliteDatabase::in_memory()?;
//! let gateway = ContentSearchGateway::new(db.clone(), db.search_context());
//!
//! let criterion = Criterion::and(vec![
//!     Criterion::content_id([12])?,
//!     Criterion::date_metadata(DateMetadataTarget::Created, Specification::between(1000, 2000)),
//! ]);
//! let query = gateway.build(&criterion, &LanguageSettings::default(), 0, Some(10))?;
//! assert!(query.sql.contains("c.id IN (?1)"));
//! assert!(query.sql.contains("c.published BETWEEN ?2 AND ?3"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "sqlite"))]
//! # fn main() {}
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod config;
pub mod content_type;
pub mod core;
pub mod error;
pub mod field_value;
pub mod language;
pub mod search;
pub mod sql;
pub mod types;

// Re-export commonly used types at crate root
pub use config::SearchConfig;
pub use error::{RepositoryError, RepositoryResult};
pub use search::{CriteriaConverter, SearchContext, SearchScope};
pub use sql::{SqlExpr, SqlFragment, SqlParam};
pub use types::{ContentTypeCriterion, Criterion, LanguageSettings, Specification};

// Re-export collaborator traits
pub use core::{ContentTypeHandler, FieldTypeService, LanguageHandler, TransformationProcessor};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
